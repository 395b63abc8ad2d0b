//! Numeric element trait for table and tensor storage
//!
//! Tables hold `f32` or `f64` observations. Statistics are always aggregated
//! in `f64` so that single-precision inputs do not lose accuracy in sums.

use bytemuck::Pod;
use num_traits::Num;
use std::fmt::Debug;

/// Base trait for floating-point element types held by tables and tensors
pub trait Numeric: Pod + Num + Copy + PartialOrd + Debug + Default + Send + Sync + 'static {
    /// Short type name for logging
    const NAME: &'static str;

    /// Convert from f64 (for writing results)
    fn from_f64(val: f64) -> Self;

    /// Convert to f64 (for aggregation)
    fn to_f64(&self) -> f64;

    /// Check if value is finite
    fn is_finite(&self) -> bool;
}

impl Numeric for f64 {
    const NAME: &'static str = "f64";

    fn from_f64(val: f64) -> Self {
        val
    }

    fn to_f64(&self) -> f64 {
        *self
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl Numeric for f32 {
    const NAME: &'static str = "f32";

    fn from_f64(val: f64) -> Self {
        val as f32
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}
