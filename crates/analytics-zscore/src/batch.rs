//! Batch z-score normalization

use crate::normalizer::{inverse_scales, Normalizer};
use crate::parameter::{Method, Parameter};
use crate::result::ZScoreResult;
use crate::statistics::{self, StatisticsEngine};
use analytics_core::{ComputePrimitives, Error, ExecutionEngine, Numeric, NumericTable, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Normalize `input` into `result`
///
/// After validation the buffers of `result` are allocated, or checked when
/// registered beforehand, and normalized columns are written straight into
/// them. On any failure every slot of `result` is cleared.
#[instrument(level = "debug", skip_all, fields(method = %parameter.method))]
pub fn compute<T, Tab, E>(
    input: &Tab,
    parameter: &Parameter,
    engine: &E,
    result: &mut ZScoreResult<T>,
) -> Result<()>
where
    T: Numeric,
    Tab: NumericTable<T> + ?Sized,
    E: ExecutionEngine<T>,
{
    let written = run(input, parameter, engine, result);
    if let Err(e) = &written {
        debug!(error = %e, "normalization failed, clearing result");
        result.clear();
    }
    written
}

fn run<T, Tab, E>(
    input: &Tab,
    parameter: &Parameter,
    engine: &E,
    result: &mut ZScoreResult<T>,
) -> Result<()>
where
    T: Numeric,
    Tab: NumericTable<T> + ?Sized,
    E: ExecutionEngine<T>,
{
    let (rows, cols) = statistics::validate(input, parameter)?;
    result.allocate(rows, cols, parameter)?;

    engine.execute(|| -> Result<()> {
        let stats = StatisticsEngine::new(engine).compute_validated(input, parameter)?;
        let degenerate: Vec<usize> = stats.degenerate_columns().collect();
        if !degenerate.is_empty() {
            debug!(?degenerate, policy = ?parameter.zero_variance, "zero-variance columns");
        }
        let scales = inverse_scales(&stats, parameter)?;
        let out = result.normalized_data_mut()?;
        Normalizer::new(engine).normalize_into(input, &stats, &scales, out)?;
        result.write_statistics(&stats)
    })?;

    debug!(rows, cols, backend = engine.primitives().backend_name(), "normalized table");
    Ok(())
}

/// Input slot of [`ZScoreBatch`]
#[derive(Clone, Default)]
pub struct Input<T: Numeric> {
    data: Option<Arc<dyn NumericTable<T>>>,
}

impl<T: Numeric> Input<T> {
    pub fn set(&mut self, table: Arc<dyn NumericTable<T>>) {
        self.data = Some(table);
    }

    pub fn get(&self) -> Option<&Arc<dyn NumericTable<T>>> {
        self.data.as_ref()
    }

    pub fn clear(&mut self) {
        self.data = None;
    }
}

impl<T: Numeric> fmt::Debug for Input<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Some(table) => {
                let (rows, cols) = table.shape();
                write!(f, "Input({rows}x{cols} {})", T::NAME)
            }
            None => f.write_str("Input(unset)"),
        }
    }
}

/// Z-score normalization algorithm holding its input, parameter and result
///
/// Cloning shares the input table, copies the parameter and starts with a
/// fresh empty result.
pub struct ZScoreBatch<T: Numeric, E: ExecutionEngine<T>> {
    pub input: Input<T>,
    pub parameter: Parameter,
    engine: E,
    result: Option<ZScoreResult<T>>,
}

impl<T: Numeric, E: ExecutionEngine<T>> ZScoreBatch<T, E> {
    pub fn new(engine: E) -> Self {
        Self::with_parameter(engine, Parameter::default())
    }

    pub fn with_parameter(engine: E, parameter: Parameter) -> Self {
        Self {
            input: Input::default(),
            parameter,
            engine,
            result: Some(ZScoreResult::new()),
        }
    }

    pub fn method(&self) -> Method {
        self.parameter.method
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn set_input(&mut self, table: Arc<dyn NumericTable<T>>) {
        self.input.set(table);
    }

    /// Register the result whose buffers the next computation writes into
    pub fn set_result(&mut self, result: ZScoreResult<T>) {
        self.result = Some(result);
    }

    pub fn result(&self) -> Option<&ZScoreResult<T>> {
        self.result.as_ref()
    }

    /// Detach the result; computing again requires [`ZScoreBatch::set_result`]
    pub fn take_result(&mut self) -> Option<ZScoreResult<T>> {
        self.result.take()
    }

    pub fn compute(&mut self) -> Result<&ZScoreResult<T>> {
        let input = self.input.data.as_deref().ok_or(Error::NullInputTable)?;
        let result = self.result.as_mut().ok_or(Error::NullResult)?;
        compute(input, &self.parameter, &self.engine, result)?;
        Ok(&*result)
    }
}

impl<T: Numeric, E: ExecutionEngine<T>> Clone for ZScoreBatch<T, E> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            parameter: self.parameter.clone(),
            engine: self.engine.clone(),
            result: Some(ZScoreResult::new()),
        }
    }
}

impl<T: Numeric, E: ExecutionEngine<T>> fmt::Debug for ZScoreBatch<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZScoreBatch")
            .field("input", &self.input)
            .field("parameter", &self.parameter)
            .field("strategy", &self.engine.strategy())
            .field("has_result", &self.result.is_some())
            .finish()
    }
}
