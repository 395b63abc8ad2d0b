//! Computational primitives with explicit backend selection
//!
//! The statistics and normalization passes only ever talk to a
//! [`ComputePrimitives`] value. Which backend that value is gets decided once,
//! by the caller, and is then passed down as an ordinary parameter.
//!
//! # Usage
//!
//! ```rust
//! use analytics_core::primitives::{ComputePrimitives, DetectedBackend, ScalarBackend};
//!
//! let data: &[f64] = &[1.0, 2.0, 3.0, 4.0];
//!
//! // Portable backend
//! let scalar = ScalarBackend::new();
//! assert_eq!(scalar.sum(data), 10.0);
//!
//! // Best backend for this CPU, detected once
//! let detected = DetectedBackend::detect();
//! assert_eq!(detected.sum(data), 10.0);
//! ```

pub mod backends;
pub mod traits;

pub use backends::{Avx2Backend, DetectedBackend, ScalarBackend};
pub use traits::ComputePrimitives;

/// Create a scalar backend (always available)
pub fn scalar_backend() -> ScalarBackend {
    ScalarBackend::new()
}

/// Create an AVX2 backend (panics if not supported)
#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
pub fn avx2_backend() -> Avx2Backend {
    Avx2Backend::new()
}

/// Detect the best backend for the running CPU
pub fn best_available_backend() -> DetectedBackend {
    DetectedBackend::detect()
}

/// Get the best available backend name
pub fn best_backend_name() -> &'static str {
    #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
    {
        if Avx2Backend::is_available() {
            return "avx2";
        }
    }
    "scalar"
}
