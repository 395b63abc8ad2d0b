//! Algorithm-specific execution kernel traits
//!
//! Algorithm crates implement their computational passes as kernels built on
//! the primitive operations, so that the backend can be swapped without
//! touching the algorithm.

use crate::{primitives::ComputePrimitives, Numeric};

/// Base trait for all statistical kernels
pub trait StatisticalKernel<T: Numeric = f64>: Clone + Send + Sync {
    /// The type of primitives used by this kernel
    type Primitives: ComputePrimitives<T>;

    /// Get the primitives used by this kernel
    fn primitives(&self) -> &Self::Primitives;

    /// Name of this kernel for debugging/logging
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
