pub mod intervals;
pub mod logging;
pub mod matrix;
pub mod pearson;
pub mod timing;
pub mod unstack;

pub use intervals::{consecutive_groups, consecutive_intervals};
pub use matrix::CorrMatrix;
pub use unstack::{unstack_corr, CorrPair, EdgeTable};
