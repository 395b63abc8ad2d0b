//! Execution configuration
//!
//! [`ExecutionConfig`] describes which backend and strategy to use; calling
//! [`ExecutionConfig::build_engine`] once at startup turns it into a
//! [`ConfiguredEngine`] that is then handed to the algorithms.

use crate::execution::{ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
use crate::execution::ParallelEngine;
use crate::numeric::Numeric;
use crate::primitives::{Avx2Backend, ComputePrimitives, DetectedBackend};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Which compute backend to run kernels on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendPreference {
    /// Best backend supported by the running CPU
    #[default]
    Auto,
    /// Portable scalar code
    Scalar,
    /// AVX2 kernels; fails if unavailable
    Avx2,
}

impl BackendPreference {
    /// Resolve the preference against the running CPU
    pub fn resolve(self) -> Result<DetectedBackend> {
        match self {
            Self::Auto => Ok(DetectedBackend::detect()),
            Self::Scalar => Ok(DetectedBackend::scalar()),
            Self::Avx2 => Avx2Backend::try_new().map(DetectedBackend::Avx2),
        }
    }
}

/// Execution configuration for the statistics and normalization passes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub strategy: ExecutionStrategy,
    pub backend: BackendPreference,
    /// Dedicated thread pool size; `None` uses the global pool
    pub num_threads: Option<usize>,
}

impl ExecutionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_backend(mut self, backend: BackendPreference) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Sequential scalar execution, useful for reproducible reference runs
    pub fn reference() -> Self {
        Self {
            strategy: ExecutionStrategy::Sequential,
            backend: BackendPreference::Scalar,
            num_threads: None,
        }
    }

    /// Build the engine described by this configuration
    pub fn build_engine<T: Numeric>(&self) -> Result<ConfiguredEngine<T>>
    where
        DetectedBackend: ComputePrimitives<T>,
    {
        let backend = self.backend.resolve()?;

        let engine = match self.strategy {
            ExecutionStrategy::Sequential => {
                ConfiguredEngine::Sequential(SequentialEngine::new(backend))
            }
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel | ExecutionStrategy::Auto => match self.num_threads {
                Some(n) => {
                    ConfiguredEngine::Parallel(ParallelEngine::with_num_threads(backend, n)?)
                }
                None => ConfiguredEngine::Parallel(ParallelEngine::new(backend)),
            },
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => {
                return Err(crate::Error::FeatureNotAvailable(
                    "parallel execution requires the `parallel` feature".to_string(),
                ))
            }
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Auto => {
                ConfiguredEngine::Sequential(SequentialEngine::new(backend))
            }
        };

        log::debug!(
            "Built {:?} engine on {} backend ({} threads)",
            engine.strategy(),
            backend.name(),
            engine.num_threads()
        );
        Ok(engine)
    }
}

/// Engine produced from an [`ExecutionConfig`]
#[derive(Clone, Debug)]
pub enum ConfiguredEngine<T: Numeric>
where
    DetectedBackend: ComputePrimitives<T>,
{
    Sequential(SequentialEngine<T, DetectedBackend>),
    #[cfg(feature = "parallel")]
    Parallel(ParallelEngine<T, DetectedBackend>),
}

impl<T: Numeric> ExecutionEngine<T> for ConfiguredEngine<T>
where
    DetectedBackend: ComputePrimitives<T>,
{
    type Primitives = DetectedBackend;

    fn primitives(&self) -> &Self::Primitives {
        match self {
            Self::Sequential(e) => e.primitives(),
            #[cfg(feature = "parallel")]
            Self::Parallel(e) => e.primitives(),
        }
    }

    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match self {
            Self::Sequential(e) => e.execute(f),
            #[cfg(feature = "parallel")]
            Self::Parallel(e) => e.execute(f),
        }
    }

    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(&'a [U]) -> R + Sync + Send,
        R: Send,
    {
        match self {
            Self::Sequential(e) => e.map_chunks(data, chunk_size, f),
            #[cfg(feature = "parallel")]
            Self::Parallel(e) => e.map_chunks(data, chunk_size, f),
        }
    }

    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        match self {
            Self::Sequential(e) => e.execute_batch(count, f),
            #[cfg(feature = "parallel")]
            Self::Parallel(e) => e.execute_batch(count, f),
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        match self {
            Self::Sequential(e) => e.strategy(),
            #[cfg(feature = "parallel")]
            Self::Parallel(e) => e.strategy(),
        }
    }

    fn num_threads(&self) -> usize {
        match self {
            Self::Sequential(e) => e.num_threads(),
            #[cfg(feature = "parallel")]
            Self::Parallel(e) => e.num_threads(),
        }
    }
}

/// Create an engine on the best backend, parallel when the feature is enabled
pub fn auto_engine<T: Numeric>() -> ConfiguredEngine<T>
where
    DetectedBackend: ComputePrimitives<T>,
{
    let backend = DetectedBackend::detect();
    #[cfg(feature = "parallel")]
    {
        ConfiguredEngine::Parallel(ParallelEngine::new(backend))
    }
    #[cfg(not(feature = "parallel"))]
    {
        ConfiguredEngine::Sequential(SequentialEngine::new(backend))
    }
}
