//! Per-column means and variances
//!
//! `defaultDense` scans the table: each column is split into blocks of at most
//! [`BLOCK_ROWS`] rows, every block gets an exact two-pass mean and sum of
//! squared deviations, and block results are merged pairwise. Wide tables are
//! parallelized over columns, tall narrow tables over row blocks.
//!
//! `sumDense` derives the statistics from caller-supplied column sums without
//! touching the data.

use crate::kernels::{BlockMoments, ZScoreKernel};
use crate::parameter::{Method, Parameter};
use analytics_core::{Error, ExecutionEngine, Numeric, NumericTable, Result};
use tracing::debug;

/// Largest number of rows aggregated in one block
pub const BLOCK_ROWS: usize = 4096;

/// Rounding allowance, in units of `sqrt(n)·ε·E[x²]`, below which a
/// `sumDense` variance counts as zero
const SUM_DENSE_ULPS: f64 = 8.0;

/// Population mean and variance of every column
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnStatistics {
    pub means: Vec<f64>,
    pub variances: Vec<f64>,
}

impl ColumnStatistics {
    pub fn n_cols(&self) -> usize {
        self.means.len()
    }

    /// Indices of columns with zero variance
    pub fn degenerate_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.variances
            .iter()
            .enumerate()
            .filter(|(_, &v)| v <= 0.0)
            .map(|(j, _)| j)
    }

    fn from_moments(moments: impl IntoIterator<Item = BlockMoments>) -> Self {
        let (means, variances): (Vec<f64>, Vec<f64>) = moments
            .into_iter()
            .map(|m| (m.center(), m.variance()))
            .unzip();
        Self { means, variances }
    }
}

/// Check that `table` is non-empty and `parameter` fits its width
///
/// Returns the table shape.
pub fn validate<T, Tab>(table: &Tab, parameter: &Parameter) -> Result<(usize, usize)>
where
    T: Numeric,
    Tab: NumericTable<T> + ?Sized,
{
    let (rows, cols) = table.shape();
    if rows == 0 || cols == 0 {
        return Err(Error::empty_table(rows, cols));
    }
    parameter.check(cols)?;
    Ok((rows, cols))
}

/// Computes [`ColumnStatistics`] with a given execution engine
pub struct StatisticsEngine<'e, T: Numeric, E: ExecutionEngine<T>> {
    engine: &'e E,
    kernel: ZScoreKernel<T, E::Primitives>,
}

impl<'e, T: Numeric, E: ExecutionEngine<T>> StatisticsEngine<'e, T, E> {
    pub fn new(engine: &'e E) -> Self {
        Self {
            engine,
            kernel: ZScoreKernel::new(engine.primitives().clone()),
        }
    }

    /// Statistics of `table` according to `parameter.method`
    pub fn compute<Tab>(&self, table: &Tab, parameter: &Parameter) -> Result<ColumnStatistics>
    where
        Tab: NumericTable<T> + ?Sized,
    {
        validate(table, parameter)?;
        self.compute_validated(table, parameter)
    }

    /// [`StatisticsEngine::compute`] for a table that already passed [`validate`]
    pub(crate) fn compute_validated<Tab>(
        &self,
        table: &Tab,
        parameter: &Parameter,
    ) -> Result<ColumnStatistics>
    where
        Tab: NumericTable<T> + ?Sized,
    {
        match parameter.method {
            Method::DefaultDense => self.scan(table),
            Method::SumDense => from_sums(parameter, table.n_rows()),
        }
    }

    fn scan<Tab>(&self, table: &Tab) -> Result<ColumnStatistics>
    where
        Tab: NumericTable<T> + ?Sized,
    {
        let (rows, cols) = table.shape();
        let kernel = &self.kernel;

        if cols >= self.engine.num_threads() {
            debug!(rows, cols, "scanning columns independently");
            let moments = self.engine.execute_batch(cols, |j| -> Result<BlockMoments> {
                let mut column = Vec::with_capacity(rows);
                table.read_column(j, &mut column)?;
                Ok(kernel.column_moments(&column, BLOCK_ROWS))
            });
            return moments
                .into_iter()
                .collect::<Result<Vec<_>>>()
                .map(ColumnStatistics::from_moments);
        }

        let block_rows = self.engine.chunk_size(rows).min(BLOCK_ROWS);
        debug!(rows, cols, block_rows, "scanning row blocks");
        let mut column = Vec::with_capacity(rows);
        let mut moments = Vec::with_capacity(cols);
        for j in 0..cols {
            table.read_column(j, &mut column)?;
            let merged = self
                .engine
                .map_chunks(&column, block_rows, |block| kernel.block_moments(block))
                .into_iter()
                .fold(BlockMoments::default(), BlockMoments::merge);
            moments.push(merged);
        }
        Ok(ColumnStatistics::from_moments(moments))
    }
}

/// `mean = s / n`, `variance = max(ss / n - mean², 0)`
///
/// `ss / n - mean²` cancels catastrophically for near-constant columns, so a
/// variance within the rounding error of the sums is reported as 0.
fn from_sums(parameter: &Parameter, rows: usize) -> Result<ColumnStatistics> {
    let sums = parameter.sums.as_ref().ok_or_else(|| {
        Error::NullParameter("sumDense requires precomputed column sums".to_string())
    })?;
    let n = rows as f64;
    let rounding = SUM_DENSE_ULPS * n.sqrt() * f64::EPSILON;

    let (means, variances): (Vec<f64>, Vec<f64>) = sums
        .sums
        .iter()
        .zip(&sums.sums_of_squares)
        .map(|(&s, &ss)| {
            let mean = s / n;
            let second_moment = ss / n;
            let var = second_moment - mean * mean;
            if var <= rounding * second_moment.abs() {
                (mean, 0.0)
            } else {
                (mean, var)
            }
        })
        .unzip();
    Ok(ColumnStatistics { means, variances })
}
