//! Execution engines for controlling computation strategy
//!
//! This module provides the execution engine abstraction that unifies
//! primitive selection (SIMD vs scalar) with execution strategy
//! (sequential vs parallel).
//!
//! # Design Philosophy
//!
//! - **Unified Control**: One value carries both the backend and the strategy
//! - **Explicit**: Engines are chosen by the caller and passed in, never global
//! - **Thread Pool Integration**: Works with the global Rayon pool or a custom one

use crate::numeric::Numeric;
use crate::primitives::{ComputePrimitives, DetectedBackend, ScalarBackend};
#[cfg(feature = "parallel")]
use crate::Result;
use serde::{Deserialize, Serialize};

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Process items sequentially
    Sequential,
    /// Process items in parallel
    Parallel,
    /// Parallel when compiled with the `parallel` feature, sequential otherwise
    #[default]
    Auto,
}

/// Trait for execution engines that control how computations are performed
///
/// An execution engine combines:
/// - Primitive operations (scalar vs SIMD)
/// - Execution strategy (sequential vs parallel)
/// - Thread pool selection
pub trait ExecutionEngine<T: Numeric>: Clone + Send + Sync {
    /// The type of primitives used by this engine
    type Primitives: ComputePrimitives<T>;

    /// Get the primitives for low-level operations
    fn primitives(&self) -> &Self::Primitives;

    /// Execute a function in the engine's execution context
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send;

    /// Map a function over chunks of data
    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(&'a [U]) -> R + Sync + Send,
        R: Send;

    /// Execute operations on multiple independent items
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Check if parallel execution is available
    fn is_parallel(&self) -> bool {
        matches!(
            self.strategy(),
            ExecutionStrategy::Parallel | ExecutionStrategy::Auto
        )
    }

    /// Get the number of threads available
    fn num_threads(&self) -> usize;

    /// Chunk size that splits `n_items` into a few chunks per thread
    fn chunk_size(&self, n_items: usize) -> usize {
        if !self.is_parallel() || n_items == 0 {
            return n_items.max(1);
        }
        let target_chunks = self.num_threads() * 4;
        n_items.div_ceil(target_chunks).max(1)
    }
}

/// Sequential execution engine
///
/// Executes all operations sequentially in the current thread.
#[derive(Clone, Debug)]
pub struct SequentialEngine<T: Numeric, P: ComputePrimitives<T>> {
    primitives: P,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Numeric, P: ComputePrimitives<T>> SequentialEngine<T, P> {
    /// Create a new sequential engine with the given primitives
    pub fn new(primitives: P) -> Self {
        Self {
            primitives,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: Numeric, P: ComputePrimitives<T>> ExecutionEngine<T> for SequentialEngine<T, P> {
    type Primitives = P;

    fn primitives(&self) -> &Self::Primitives {
        &self.primitives
    }

    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        f()
    }

    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(&'a [U]) -> R + Sync + Send,
        R: Send,
    {
        data.chunks(chunk_size.max(1)).map(f).collect()
    }

    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).map(f).collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
///
/// Executes operations in parallel using Rayon's thread pool.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug)]
pub struct ParallelEngine<T: Numeric, P: ComputePrimitives<T>> {
    primitives: P,
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
    _phantom: std::marker::PhantomData<T>,
}

#[cfg(feature = "parallel")]
impl<T: Numeric, P: ComputePrimitives<T>> ParallelEngine<T, P> {
    /// Create a new parallel engine with default thread pool
    pub fn new(primitives: P) -> Self {
        Self {
            primitives,
            thread_pool: None,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Create a new parallel engine with a custom thread pool
    pub fn with_thread_pool(primitives: P, pool: std::sync::Arc<rayon::ThreadPool>) -> Self {
        Self {
            primitives,
            thread_pool: Some(pool),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Create with a specific number of threads
    pub fn with_num_threads(primitives: P, num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| crate::Error::Execution(format!("Failed to create thread pool: {e}")))?;

        log::debug!("Created parallel engine with {num_threads} threads");
        Ok(Self {
            primitives,
            thread_pool: Some(std::sync::Arc::new(pool)),
            _phantom: std::marker::PhantomData,
        })
    }
}

#[cfg(feature = "parallel")]
impl<T: Numeric, P: ComputePrimitives<T>> ExecutionEngine<T> for ParallelEngine<T, P> {
    type Primitives = P;

    fn primitives(&self) -> &Self::Primitives {
        &self.primitives
    }

    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if let Some(pool) = &self.thread_pool {
            pool.install(f)
        } else {
            f()
        }
    }

    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(&'a [U]) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        let chunk_size = chunk_size.max(1);
        if let Some(pool) = &self.thread_pool {
            pool.install(|| data.par_chunks(chunk_size).map(f).collect())
        } else {
            data.par_chunks(chunk_size).map(f).collect()
        }
    }

    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        if let Some(pool) = &self.thread_pool {
            pool.install(|| (0..count).into_par_iter().map(f).collect())
        } else {
            (0..count).into_par_iter().map(f).collect()
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        if let Some(pool) = &self.thread_pool {
            pool.current_num_threads()
        } else {
            rayon::current_num_threads()
        }
    }
}

/// Create a sequential scalar engine
pub fn scalar_sequential<T: Numeric>() -> SequentialEngine<T, ScalarBackend> {
    SequentialEngine::new(ScalarBackend)
}

/// Create a sequential engine on the best backend for this CPU
pub fn simd_sequential<T: Numeric>() -> SequentialEngine<T, DetectedBackend>
where
    DetectedBackend: ComputePrimitives<T>,
{
    SequentialEngine::new(DetectedBackend::detect())
}

/// Create a parallel scalar engine
#[cfg(feature = "parallel")]
pub fn scalar_parallel<T: Numeric>() -> ParallelEngine<T, ScalarBackend> {
    ParallelEngine::new(ScalarBackend)
}

/// Create a parallel engine on the best backend for this CPU
#[cfg(feature = "parallel")]
pub fn simd_parallel<T: Numeric>() -> ParallelEngine<T, DetectedBackend>
where
    DetectedBackend: ComputePrimitives<T>,
{
    ParallelEngine::new(DetectedBackend::detect())
}
