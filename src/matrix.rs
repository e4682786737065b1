use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::pearson;

/// A square pairwise-correlation matrix with shared row/column labels.
///
/// Entry `(i, j)` is the correlation between `labels[i]` and `labels[j]`;
/// the diagonal is conventionally 1.0.
#[derive(Debug, Clone)]
pub struct CorrMatrix {
    labels: Vec<String>,
    values: Array2<f64>,
}

impl CorrMatrix {
    /// Wrap an existing correlation matrix.
    ///
    /// Panics when `values` is not square or `labels` does not match its
    /// dimension: a malformed matrix is a structural fault at the call
    /// site, not a condition this type recovers from.
    pub fn new(labels: Vec<String>, values: Array2<f64>) -> Self {
        assert_eq!(
            values.nrows(),
            values.ncols(),
            "correlation matrix must be square"
        );
        assert_eq!(
            labels.len(),
            values.nrows(),
            "label count must match matrix dimension"
        );
        Self { labels, values }
    }

    /// Pearson correlation matrix over the rows of `data`.
    ///
    /// Rows are variables, columns observations. The diagonal is exactly
    /// 1.0.
    pub fn from_data<S>(labels: Vec<String>, data: &ArrayBase<S, Ix2>) -> Self
    where
        S: Data<Elem = f64>,
    {
        assert_eq!(
            labels.len(),
            data.nrows(),
            "label count must match data row count"
        );
        Self::new(labels, pearson::correlation_matrix(data))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of labels (matrix dimension).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Correlation between two labels, `None` when either is unknown.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        Some(self.values[[i, j]])
    }
}
