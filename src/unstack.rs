use std::collections::HashSet;

use crate::matrix::CorrMatrix;

/// One unordered pair of labels and the correlation between them.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrPair {
    pub first: String,
    pub second: String,
    pub corr: f64,
}

/// Long-form rendition of a correlation matrix: one row per unordered
/// label pair, sorted by correlation.
///
/// `first_col` and `second_col` carry the caller-chosen names for the two
/// label columns, used as the header when the table is serialized.
#[derive(Debug, Clone)]
pub struct EdgeTable {
    pub first_col: String,
    pub second_col: String,
    pub pairs: Vec<CorrPair>,
}

/// Unstack a correlation matrix into a sorted table of unique pairwise
/// correlations.
///
/// All N² entries are flattened in row-major order and stable-sorted by
/// value per `ascending` (`f64::total_cmp`, so NaN sorts above every real
/// value ascending and below every real value descending). Self-pairs are
/// dropped, and of the two mirrored rows each unordered pair produces, the
/// first occurrence in sort order is kept. The surviving row is oriented
/// with the lexicographically smaller label in the first column.
///
/// For a symmetric N-label matrix with no missing values the result has
/// exactly N*(N-1)/2 rows. The input matrix is not modified.
pub fn unstack_corr(
    corr: &CorrMatrix,
    ascending: bool,
    first_col: &str,
    second_col: &str,
) -> EdgeTable {
    let labels = corr.labels();
    let values = corr.values();
    let n = labels.len();

    let mut triples: Vec<(usize, usize, f64)> = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            triples.push((i, j, values[[i, j]]));
        }
    }

    // Stable sort keeps row-major flatten order among equal values.
    if ascending {
        triples.sort_by(|a, b| a.2.total_cmp(&b.2));
    } else {
        triples.sort_by(|a, b| b.2.total_cmp(&a.2));
    }

    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(n * n / 2);
    let mut pairs = Vec::new();
    for (i, j, value) in triples {
        if i == j {
            continue;
        }
        let (a, b) = if labels[i] <= labels[j] { (i, j) } else { (j, i) };
        if !seen.insert((labels[a].as_str(), labels[b].as_str())) {
            continue;
        }
        pairs.push(CorrPair {
            first: labels[a].clone(),
            second: labels[b].clone(),
            corr: value,
        });
    }

    EdgeTable {
        first_col: first_col.to_string(),
        second_col: second_col.to_string(),
        pairs,
    }
}
