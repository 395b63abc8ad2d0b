//! Batch z-score normalization of numeric tables
//!
//! Every column `j` of the input is transformed to
//! `(x[i][j] - mean[j]) / sqrt(variance[j])`, using the population variance.
//! Means and variances are either scanned from the data
//! ([`Method::DefaultDense`]) or derived from column sums supplied by the
//! caller ([`Method::SumDense`]).
//!
//! # Example
//!
//! ```rust
//! use analytics_core::{scalar_sequential, HomogenTable};
//! use analytics_zscore::{Parameter, ResultsToCompute, ZScoreBatch};
//! use std::sync::Arc;
//!
//! let table = HomogenTable::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
//!
//! let mut batch = ZScoreBatch::with_parameter(
//!     scalar_sequential::<f64>(),
//!     Parameter::default().with_results(ResultsToCompute::MEAN),
//! );
//! batch.set_input(Arc::new(table));
//!
//! let result = batch.compute().unwrap();
//! assert_eq!(result.means().unwrap().as_slice(), &[3.0, 4.0]);
//! assert_eq!(result.normalized_data().unwrap().get(1, 0), Some(0.0));
//! ```

pub mod batch;
pub mod kernels;
pub mod normalizer;
pub mod parameter;
pub mod result;
pub mod statistics;

pub use batch::{compute, Input, ZScoreBatch};
pub use kernels::{BlockMoments, ZScoreKernel};
pub use normalizer::{inverse_scales, Normalizer};
pub use parameter::{Method, Parameter, PrecomputedSums, ResultsToCompute, ZeroVariancePolicy};
pub use result::{ZScoreResult, ZScoreResultId};
pub use statistics::{validate, ColumnStatistics, StatisticsEngine, BLOCK_ROWS};

pub use analytics_core::{Error, Result};
