//! Core tables, compute primitives and execution engines for the analytics toolkit
//!
//! # Architecture Overview
//!
//! 1. **Data**: [`NumericTable`] block access over [`HomogenTable`] and
//!    [`SoaTable`], plus [`Tensor`] and keyed result slots ([`SlotMap`])
//! 2. **Primitives**: [`ComputePrimitives`] implemented per CPU backend
//! 3. **Execution**: [`ExecutionEngine`] pairing a backend with a sequential
//!    or parallel strategy, chosen once through [`ExecutionConfig`]
//!
//! # Example
//!
//! ```rust
//! use analytics_core::{
//!     execution::{scalar_sequential, ExecutionEngine},
//!     ComputePrimitives, HomogenTable, NumericTable,
//! };
//!
//! let table = HomogenTable::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let mut column = Vec::new();
//! table.read_column(0, &mut column).unwrap();
//!
//! let engine = scalar_sequential::<f64>();
//! assert_eq!(engine.primitives().mean(&column[..]), 2.0);
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod kernels;
pub mod numeric;
pub mod primitives;
pub mod slots;
pub mod table;
pub mod tensor;

pub use error::{Error, Result, Status};

pub use config::{auto_engine, BackendPreference, ConfiguredEngine, ExecutionConfig};
pub use execution::{
    scalar_sequential, simd_sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine,
};
#[cfg(feature = "parallel")]
pub use execution::{scalar_parallel, simd_parallel, ParallelEngine};

pub use primitives::{
    best_available_backend, best_backend_name, scalar_backend, Avx2Backend, ComputePrimitives,
    DetectedBackend, ScalarBackend,
};

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
pub use primitives::avx2_backend;

pub use kernels::StatisticalKernel;
pub use numeric::Numeric;
pub use slots::{SlotKey, SlotMap};
pub use table::{ColumnData, HomogenTable, NumericTable, SoaTable};
pub use tensor::Tensor;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ComputePrimitives, ExecutionConfig, ExecutionEngine, ExecutionStrategy, HomogenTable,
        Numeric, NumericTable, Result, SoaTable, Tensor,
    };

    pub use crate::error::Error;

    pub use crate::execution::{scalar_sequential, simd_sequential, SequentialEngine};
    #[cfg(feature = "parallel")]
    pub use crate::execution::simd_parallel;
}
