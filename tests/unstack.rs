use std::collections::HashSet;

use ndarray::{arr2, Array2};
use runcorr::{unstack_corr, CorrMatrix};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn sample_matrix() -> CorrMatrix {
    CorrMatrix::new(
        labels(&["a", "b", "c", "d"]),
        arr2(&[
            [1.0, 0.8, -0.2, 0.5],
            [0.8, 1.0, 0.1, -0.7],
            [-0.2, 0.1, 1.0, 0.3],
            [0.5, -0.7, 0.3, 1.0],
        ]),
    )
}

#[test]
fn two_by_two_matrix_yields_single_pair() {
    // Correlation of A = [1, 2, 3, 4] with B = [1.5, 2.3, 3.2, 4.1]
    let corr = CorrMatrix::new(
        labels(&["A", "B"]),
        arr2(&[[1.0, 0.99960388], [0.99960388, 1.0]]),
    );

    let table = unstack_corr(&corr, false, "col_1", "col_2");
    assert_eq!(table.first_col, "col_1");
    assert_eq!(table.second_col, "col_2");
    assert_eq!(table.pairs.len(), 1);
    assert_eq!(table.pairs[0].first, "A");
    assert_eq!(table.pairs[0].second, "B");
    assert!(approx_eq(table.pairs[0].corr, 0.99960388, 1e-12));
}

#[test]
fn pair_count_is_n_choose_two() {
    let table = unstack_corr(&sample_matrix(), false, "col_1", "col_2");
    assert_eq!(table.pairs.len(), 6);
}

#[test]
fn no_self_or_mirrored_pairs() {
    let table = unstack_corr(&sample_matrix(), false, "col_1", "col_2");

    let mut seen = HashSet::new();
    for pair in &table.pairs {
        assert_ne!(pair.first, pair.second);
        let key = if pair.first <= pair.second {
            (pair.first.clone(), pair.second.clone())
        } else {
            (pair.second.clone(), pair.first.clone())
        };
        assert!(seen.insert(key), "duplicate pair {}/{}", pair.first, pair.second);
    }
}

#[test]
fn values_round_trip_to_the_matrix() {
    let corr = sample_matrix();
    let table = unstack_corr(&corr, true, "col_1", "col_2");

    for pair in &table.pairs {
        let expected = corr.get(&pair.first, &pair.second).unwrap();
        assert!(approx_eq(pair.corr, expected, 1e-12));
        let mirrored = corr.get(&pair.second, &pair.first).unwrap();
        assert!(approx_eq(pair.corr, mirrored, 1e-12));
    }
}

#[test]
fn descending_sort_is_non_increasing() {
    let table = unstack_corr(&sample_matrix(), false, "col_1", "col_2");
    for window in table.pairs.windows(2) {
        assert!(window[0].corr >= window[1].corr);
    }
}

#[test]
fn ascending_sort_is_non_decreasing() {
    let table = unstack_corr(&sample_matrix(), true, "col_1", "col_2");
    for window in table.pairs.windows(2) {
        assert!(window[0].corr <= window[1].corr);
    }
}

#[test]
fn first_column_holds_the_smaller_label() {
    let table = unstack_corr(&sample_matrix(), false, "col_1", "col_2");
    for pair in &table.pairs {
        assert!(pair.first < pair.second);
    }
}

#[test]
fn tied_values_still_keep_one_row_per_pair() {
    let corr = CorrMatrix::new(
        labels(&["x", "y", "z"]),
        arr2(&[[1.0, 0.5, 0.5], [0.5, 1.0, 0.5], [0.5, 0.5, 1.0]]),
    );

    let table = unstack_corr(&corr, false, "col_1", "col_2");
    assert_eq!(table.pairs.len(), 3);
    assert!(table.pairs.iter().all(|p| approx_eq(p.corr, 0.5, 1e-12)));
}

#[test]
fn nan_entries_sort_to_the_extremes() {
    let values = arr2(&[
        [1.0, f64::NAN, 0.4],
        [f64::NAN, 1.0, 0.2],
        [0.4, 0.2, 1.0],
    ]);
    let corr = CorrMatrix::new(labels(&["x", "y", "z"]), values);

    let descending = unstack_corr(&corr, false, "col_1", "col_2");
    assert_eq!(descending.pairs.len(), 3);
    assert!(descending.pairs[0].corr.is_nan());

    let ascending = unstack_corr(&corr, true, "col_1", "col_2");
    assert!(ascending.pairs[2].corr.is_nan());
}

#[test]
fn empty_matrix_unstacks_to_empty_table() {
    let corr = CorrMatrix::new(Vec::new(), Array2::zeros((0, 0)));
    let table = unstack_corr(&corr, false, "col_1", "col_2");
    assert!(table.pairs.is_empty());
}

#[test]
#[should_panic(expected = "square")]
fn non_square_matrix_is_rejected() {
    CorrMatrix::new(labels(&["a", "b"]), Array2::zeros((2, 3)));
}

#[test]
#[should_panic(expected = "label count")]
fn mismatched_labels_are_rejected() {
    CorrMatrix::new(labels(&["a", "b", "c"]), Array2::zeros((2, 2)));
}
