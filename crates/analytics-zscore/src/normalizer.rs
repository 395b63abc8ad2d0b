//! Applies `(x - mean) / sqrt(variance)` column by column

use crate::kernels::ZScoreKernel;
use crate::parameter::{Parameter, ZeroVariancePolicy};
use crate::statistics::ColumnStatistics;
use analytics_core::{Error, ExecutionEngine, Numeric, NumericTable, Result};

/// Multiplier applied to each centered column
///
/// `1 / sqrt(variance)` when scaling, `1` when only centering. A column with
/// zero variance gets `0` under [`ZeroVariancePolicy::EmitZero`] and fails with
/// [`Error::DegenerateColumn`] under [`ZeroVariancePolicy::Reject`].
pub fn inverse_scales(stats: &ColumnStatistics, parameter: &Parameter) -> Result<Vec<f64>> {
    if !parameter.do_scale {
        return Ok(vec![1.0; stats.n_cols()]);
    }
    stats
        .variances
        .iter()
        .enumerate()
        .map(|(column, &var)| {
            if var > 0.0 {
                Ok(1.0 / var.sqrt())
            } else {
                match parameter.zero_variance {
                    ZeroVariancePolicy::EmitZero => Ok(0.0),
                    ZeroVariancePolicy::Reject => Err(Error::DegenerateColumn { column }),
                }
            }
        })
        .collect()
}

/// Produces normalized columns with a given execution engine
pub struct Normalizer<'e, T: Numeric, E: ExecutionEngine<T>> {
    engine: &'e E,
    kernel: ZScoreKernel<T, E::Primitives>,
}

impl<'e, T: Numeric, E: ExecutionEngine<T>> Normalizer<'e, T, E> {
    pub fn new(engine: &'e E) -> Self {
        Self {
            engine,
            kernel: ZScoreKernel::new(engine.primitives().clone()),
        }
    }

    /// Write the normalized columns of `table` into `out`
    ///
    /// Columns are processed in groups of one per engine thread, and each group
    /// is written before the next is computed.
    pub fn normalize_into<Tab, Out>(
        &self,
        table: &Tab,
        stats: &ColumnStatistics,
        inv_scales: &[f64],
        out: &mut Out,
    ) -> Result<()>
    where
        Tab: NumericTable<T> + ?Sized,
        Out: NumericTable<T> + ?Sized,
    {
        let (rows, cols) = table.shape();
        if stats.n_cols() != cols {
            return Err(Error::size_mismatch(cols, stats.n_cols(), "column statistics"));
        }
        if inv_scales.len() != cols {
            return Err(Error::size_mismatch(cols, inv_scales.len(), "column scales"));
        }
        if out.n_rows() != rows {
            return Err(Error::size_mismatch(rows, out.n_rows(), "output rows"));
        }
        if out.n_cols() != cols {
            return Err(Error::size_mismatch(cols, out.n_cols(), "output columns"));
        }

        let kernel = &self.kernel;
        let group = self.engine.num_threads().max(1);
        for start in (0..cols).step_by(group) {
            let width = group.min(cols - start);
            let columns = self.engine.execute_batch(width, |k| -> Result<Vec<T>> {
                let j = start + k;
                let mut column = Vec::with_capacity(rows);
                table.read_column(j, &mut column)?;
                let mut normalized = vec![T::default(); rows];
                kernel.standardize(&column, stats.means[j], inv_scales[j], &mut normalized);
                Ok(normalized)
            });
            for (k, column) in columns.into_iter().enumerate() {
                out.write_column(start + k, &column?)?;
            }
        }
        Ok(())
    }
}
