//! Compute primitives trait
//!
//! The column statistics and normalization passes are expressed in terms of
//! these operations so that each backend can supply its own kernels.

use crate::numeric::Numeric;

/// Trait for computational primitives with generic numeric support
///
/// Aggregates are returned as `f64` regardless of the element type.
pub trait ComputePrimitives<T: Numeric = f64>: Clone + Send + Sync {
    /// Get the name of this backend
    fn backend_name(&self) -> &'static str;

    /// Get the SIMD width (number of elements processed in parallel)
    fn simd_width(&self) -> usize {
        1
    }

    /// Sum all elements in a slice
    fn sum(&self, data: &[T]) -> f64 {
        data.iter().fold(0.0, |acc, x| acc + x.to_f64())
    }

    /// Compute sum of squares
    fn sum_of_squares(&self, data: &[T]) -> f64 {
        data.iter().fold(0.0, |acc, x| {
            let f = x.to_f64();
            acc + f * f
        })
    }

    /// Compute Σ(x - center)², the second pass of a two-pass variance
    fn sum_squared_deviations(&self, data: &[T], center: f64) -> f64 {
        data.iter().fold(0.0, |acc, x| {
            let diff = x.to_f64() - center;
            acc + diff * diff
        })
    }

    /// Compute mean of a slice
    fn mean(&self, data: &[T]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        self.sum(data) / data.len() as f64
    }

    /// Write `(x - center) * inv_scale` for every element of `data` into `out`
    fn standardize_into(&self, data: &[T], center: f64, inv_scale: f64, out: &mut [T]) {
        debug_assert_eq!(
            data.len(),
            out.len(),
            "Input and output must have same length"
        );

        for (dst, x) in out.iter_mut().zip(data.iter()) {
            *dst = T::from_f64((x.to_f64() - center) * inv_scale);
        }
    }
}
