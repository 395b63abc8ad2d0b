//! Batch z-score normalization and weight-initializer tasks
//!
//! This crate re-exports the workspace crates:
//!
//! - [`analytics_core`]: numeric tables, compute backends, execution engines
//! - [`analytics_zscore`]: per-column standardization of numeric tables
//! - [`analytics_initializers`]: Xavier initialization task descriptors
//!
//! # Example
//!
//! ```rust
//! use analytics::prelude::*;
//! use std::sync::Arc;
//!
//! let engine = ExecutionConfig::reference().build_engine::<f64>().unwrap();
//! let table = HomogenTable::from_rows(&[[1.0, 10.0], [3.0, 30.0]]).unwrap();
//!
//! let mut batch = ZScoreBatch::new(engine);
//! batch.set_input(Arc::new(table));
//! let result = batch.compute().unwrap();
//! assert_eq!(result.normalized_data().unwrap().as_slice(), &[-1.0, -1.0, 1.0, 1.0]);
//! ```

pub use analytics_core;
pub use analytics_initializers;
pub use analytics_zscore;

pub use analytics_core::{Error, Result};

pub mod prelude {
    pub use analytics_core::prelude::*;
    pub use analytics_initializers::{
        DenseShape, InitializerResult, LayerShape, RandomFillKernel, XavierInitializer,
        XavierParameter, XavierTaskDescriptor,
    };
    pub use analytics_zscore::{
        Method, Parameter, ResultsToCompute, ZScoreBatch, ZScoreResult, ZeroVariancePolicy,
    };
}
