//! Concrete backend implementations
//!
//! No Box, no dyn: each backend is a small `Copy` type. [`DetectedBackend`]
//! is the runtime-selected variant used when the choice depends on the CPU.

pub mod avx2;
pub mod scalar;

pub use avx2::Avx2Backend;
pub use scalar::ScalarBackend;

use super::ComputePrimitives;

/// Backend chosen at runtime from the capabilities of the running CPU
#[derive(Clone, Copy, Debug)]
pub enum DetectedBackend {
    Scalar(ScalarBackend),
    Avx2(Avx2Backend),
}

impl DetectedBackend {
    /// Pick AVX2 when it is compiled in and supported, otherwise scalar
    pub fn detect() -> Self {
        let backend = match Avx2Backend::try_new() {
            Ok(avx2) => Self::Avx2(avx2),
            Err(_) => Self::Scalar(ScalarBackend),
        };
        log::debug!("Detected compute backend: {}", backend.name());
        backend
    }

    /// Force the portable backend
    pub fn scalar() -> Self {
        Self::Scalar(ScalarBackend)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Avx2(_) => "avx2",
        }
    }
}

impl Default for DetectedBackend {
    fn default() -> Self {
        Self::detect()
    }
}

macro_rules! impl_detected_backend {
    ($type:ty) => {
        impl ComputePrimitives<$type> for DetectedBackend {
            fn backend_name(&self) -> &'static str {
                match self {
                    Self::Scalar(b) => ComputePrimitives::<$type>::backend_name(b),
                    Self::Avx2(b) => ComputePrimitives::<$type>::backend_name(b),
                }
            }

            fn simd_width(&self) -> usize {
                match self {
                    Self::Scalar(b) => ComputePrimitives::<$type>::simd_width(b),
                    Self::Avx2(b) => ComputePrimitives::<$type>::simd_width(b),
                }
            }

            fn sum(&self, data: &[$type]) -> f64 {
                match self {
                    Self::Scalar(b) => b.sum(data),
                    Self::Avx2(b) => b.sum(data),
                }
            }

            fn sum_of_squares(&self, data: &[$type]) -> f64 {
                match self {
                    Self::Scalar(b) => b.sum_of_squares(data),
                    Self::Avx2(b) => b.sum_of_squares(data),
                }
            }

            fn sum_squared_deviations(&self, data: &[$type], center: f64) -> f64 {
                match self {
                    Self::Scalar(b) => b.sum_squared_deviations(data, center),
                    Self::Avx2(b) => b.sum_squared_deviations(data, center),
                }
            }

            fn standardize_into(
                &self,
                data: &[$type],
                center: f64,
                inv_scale: f64,
                out: &mut [$type],
            ) {
                match self {
                    Self::Scalar(b) => b.standardize_into(data, center, inv_scale, out),
                    Self::Avx2(b) => b.standardize_into(data, center, inv_scale, out),
                }
            }
        }
    };
}

impl_detected_backend!(f32);
impl_detected_backend!(f64);
