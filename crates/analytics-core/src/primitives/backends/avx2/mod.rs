//! AVX2 backend implementation
//!
//! Kernels live in [`ops`]; this module only guards them behind the runtime
//! CPU check performed when the backend is constructed.

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
mod ops;

use crate::primitives::ComputePrimitives;
use crate::{Error, Result};

/// AVX2 backend for x86_64 processors
#[derive(Clone, Copy, Debug)]
pub struct Avx2Backend {
    _private: (),
}

impl Avx2Backend {
    /// Create a new AVX2 backend
    ///
    /// # Panics
    /// Panics if the CPU doesn't support AVX2 instructions
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(backend) => backend,
            Err(e) => panic!("AVX2 backend requested: {e}"),
        }
    }

    /// Create a new AVX2 backend, failing if it cannot be used on this machine
    pub fn try_new() -> Result<Self> {
        #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
        {
            if !is_x86_feature_detected!("avx2") {
                return Err(Error::FeatureNotAvailable(
                    "CPU doesn't support AVX2 instructions".to_string(),
                ));
            }
            Ok(Self { _private: () })
        }
        #[cfg(not(all(target_arch = "x86_64", feature = "avx2")))]
        {
            Err(Error::FeatureNotAvailable(
                "not compiled with AVX2 support".to_string(),
            ))
        }
    }

    /// Check if AVX2 is available on this CPU
    pub fn is_available() -> bool {
        #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
        {
            is_x86_feature_detected!("avx2")
        }
        #[cfg(not(all(target_arch = "x86_64", feature = "avx2")))]
        {
            false
        }
    }
}

// Kernels are only reachable through a constructed backend, and construction
// checks CPU support, so the unsafe calls below are sound.
#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
macro_rules! impl_avx2_backend {
    ($type:ty, $width:expr, $sum:ident, $sum_sq:ident, $sum_dev:ident, $standardize:ident) => {
        impl ComputePrimitives<$type> for Avx2Backend {
            fn backend_name(&self) -> &'static str {
                "avx2"
            }

            fn simd_width(&self) -> usize {
                $width
            }

            fn sum(&self, data: &[$type]) -> f64 {
                unsafe { ops::$sum(data) }
            }

            fn sum_of_squares(&self, data: &[$type]) -> f64 {
                unsafe { ops::$sum_sq(data) }
            }

            fn sum_squared_deviations(&self, data: &[$type], center: f64) -> f64 {
                unsafe { ops::$sum_dev(data, center) }
            }

            fn standardize_into(
                &self,
                data: &[$type],
                center: f64,
                inv_scale: f64,
                out: &mut [$type],
            ) {
                assert_eq!(data.len(), out.len(), "Input and output must have same length");
                unsafe { ops::$standardize(data, center, inv_scale, out) }
            }
        }
    };
}

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
impl_avx2_backend!(
    f64,
    4,
    sum_f64,
    sum_of_squares_f64,
    sum_squared_deviations_f64,
    standardize_f64
);

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
impl_avx2_backend!(
    f32,
    4,
    sum_f32,
    sum_of_squares_f32,
    sum_squared_deviations_f32,
    standardize_f32
);

// Fallback for non-AVX2 builds. Unreachable in practice since the backend
// cannot be constructed, but keeps the type usable in generic code.
#[cfg(not(all(target_arch = "x86_64", feature = "avx2")))]
impl ComputePrimitives<f64> for Avx2Backend {
    fn backend_name(&self) -> &'static str {
        "avx2 (unavailable)"
    }
}

#[cfg(not(all(target_arch = "x86_64", feature = "avx2")))]
impl ComputePrimitives<f32> for Avx2Backend {
    fn backend_name(&self) -> &'static str {
        "avx2 (unavailable)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_matches_availability() {
        assert_eq!(Avx2Backend::try_new().is_ok(), Avx2Backend::is_available());
    }

    #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
    #[test]
    fn test_avx2_matches_scalar() {
        use crate::primitives::ScalarBackend;
        use approx::assert_relative_eq;

        if !Avx2Backend::is_available() {
            return;
        }
        let avx2 = Avx2Backend::new();
        let scalar = ScalarBackend::new();

        for len in [0usize, 1, 3, 4, 5, 7, 8, 9, 31, 64, 127] {
            let data: Vec<f64> = (0..len).map(|i| (i as f64).sin() * 10.0).collect();
            assert_relative_eq!(avx2.sum(&data[..]), scalar.sum(&data[..]), epsilon = 1e-9);
            assert_relative_eq!(
                avx2.sum_of_squares(&data[..]),
                scalar.sum_of_squares(&data[..]),
                epsilon = 1e-9
            );
            assert_relative_eq!(
                avx2.sum_squared_deviations(&data[..], 0.25),
                scalar.sum_squared_deviations(&data[..], 0.25),
                epsilon = 1e-9
            );

            let mut a = vec![0.0; len];
            let mut b = vec![0.0; len];
            avx2.standardize_into(&data[..], 0.25, 0.5, &mut a[..]);
            scalar.standardize_into(&data[..], 0.25, 0.5, &mut b[..]);
            for (x, y) in a.iter().zip(b.iter()) {
                assert_relative_eq!(*x, *y, epsilon = 1e-12);
            }

            let data32: Vec<f32> = data.iter().map(|&x| x as f32).collect();
            assert_relative_eq!(avx2.sum(&data32[..]), scalar.sum(&data32[..]), epsilon = 1e-6);
        }
    }
}
