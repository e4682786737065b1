use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};

/// Compute the Pearson correlation matrix for the rows of a data matrix.
///
/// Rows are variables, columns observations. Rows with zero or non-finite
/// variance correlate as NaN with every other row; the diagonal is always
/// exactly 1.0. Fewer than two observation columns leaves every
/// off-diagonal entry NaN.
pub fn correlation_matrix<S>(data: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let (n_rows, n_cols) = data.dim();

    let mut corr = Array2::from_elem((n_rows, n_rows), f64::NAN);
    for i in 0..n_rows {
        corr[[i, i]] = 1.0;
    }
    if n_rows == 0 || n_cols < 2 {
        return corr;
    }

    let means = data
        .mean_axis(Axis(1))
        .expect("non-empty along sample axis")
        .insert_axis(Axis(1));
    let centered = data - &means;

    let cov = centered.dot(&centered.t()) / (n_cols as f64 - 1.0);
    let stds: Vec<f64> = cov.diag().iter().map(|v| v.sqrt()).collect();

    for i in 0..n_rows {
        for j in 0..n_rows {
            if i == j {
                continue;
            }
            let scale = stds[i] * stds[j];
            corr[[i, j]] = if scale.is_finite() && scale != 0.0 {
                cov[[i, j]] / scale
            } else {
                f64::NAN
            };
        }
    }
    corr
}
