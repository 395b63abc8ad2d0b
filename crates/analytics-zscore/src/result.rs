//! Result of z-score normalization

use crate::parameter::{Parameter, ResultsToCompute};
use crate::statistics::ColumnStatistics;
use analytics_core::{Error, HomogenTable, Numeric, NumericTable, Result, SlotKey, SlotMap};

/// Slots of a [`ZScoreResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZScoreResultId {
    /// `rows x cols` normalized table
    NormalizedData,
    /// `1 x cols` column means, present when requested
    Means,
    /// `1 x cols` column variances, present when requested
    Variances,
}

impl SlotKey for ZScoreResultId {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::NormalizedData => "normalizedData",
            Self::Means => "means",
            Self::Variances => "variances",
        }
    }
}

/// Output tables of one computation
///
/// Buffers may be registered up front with [`ZScoreResult::set`]; they are
/// reused when their shape matches the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ZScoreResult<T: Numeric> {
    slots: SlotMap<ZScoreResultId, HomogenTable<T>>,
}

impl<T: Numeric> Default for ZScoreResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> ZScoreResult<T> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::new(),
        }
    }

    pub fn get(&self, id: ZScoreResultId) -> Option<&HomogenTable<T>> {
        self.slots.get(id)
    }

    /// Register a caller-provided buffer
    pub fn set(&mut self, id: ZScoreResultId, table: HomogenTable<T>) {
        self.slots.set(id, table);
    }

    pub fn take(&mut self, id: ZScoreResultId) -> Option<HomogenTable<T>> {
        self.slots.take(id)
    }

    pub fn normalized_data(&self) -> Option<&HomogenTable<T>> {
        self.get(ZScoreResultId::NormalizedData)
    }

    pub fn means(&self) -> Option<&HomogenTable<T>> {
        self.get(ZScoreResultId::Means)
    }

    pub fn variances(&self) -> Option<&HomogenTable<T>> {
        self.get(ZScoreResultId::Variances)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Make every slot required by `parameter` hold a buffer of the right shape
    ///
    /// Slots for statistics that were not requested are emptied.
    pub fn allocate(&mut self, rows: usize, cols: usize, parameter: &Parameter) -> Result<()> {
        self.ensure(ZScoreResultId::NormalizedData, rows, cols)?;
        for (flag, id) in [
            (ResultsToCompute::MEAN, ZScoreResultId::Means),
            (ResultsToCompute::VARIANCE, ZScoreResultId::Variances),
        ] {
            if parameter.wants(flag) {
                self.ensure(id, 1, cols)?;
            } else {
                self.slots.take(id);
            }
        }
        Ok(())
    }

    fn ensure(&mut self, id: ZScoreResultId, rows: usize, cols: usize) -> Result<()> {
        if let Some(existing) = self.slots.get(id) {
            if existing.shape() == (rows, cols) {
                return Ok(());
            }
            let (r, c) = existing.shape();
            return Err(Error::AllocationFailure(format!(
                "registered {} buffer is {r}x{c}, expected {rows}x{cols}",
                id.name()
            )));
        }
        self.slots.set(id, HomogenTable::new(rows, cols)?);
        Ok(())
    }

    /// Allocated normalized-data buffer
    pub(crate) fn normalized_data_mut(&mut self) -> Result<&mut HomogenTable<T>> {
        self.slots
            .get_mut(ZScoreResultId::NormalizedData)
            .ok_or(Error::NullResult)
    }

    /// Fill the allocated mean and variance buffers
    pub(crate) fn write_statistics(&mut self, stats: &ColumnStatistics) -> Result<()> {
        for (id, values) in [
            (ZScoreResultId::Means, &stats.means),
            (ZScoreResultId::Variances, &stats.variances),
        ] {
            if let Some(table) = self.slots.get_mut(id) {
                for (j, &v) in values.iter().enumerate() {
                    table.write_column(j, &[T::from_f64(v)])?;
                }
            }
        }
        Ok(())
    }
}
