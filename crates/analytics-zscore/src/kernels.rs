//! Column kernels for the statistics and normalization passes

use analytics_core::{primitives::ScalarBackend, ComputePrimitives, Numeric, StatisticalKernel};

/// Partial moments of one block of a column
///
/// `m2` is the sum of squared deviations from `mean`. Blocks are combined
/// with [`BlockMoments::merge`], the pairwise update of Chan, Golub and LeVeque.
/// `min` and `max` identify constant blocks exactly, where rounding in the
/// mean would otherwise leave a tiny nonzero `m2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockMoments {
    pub count: usize,
    pub mean: f64,
    pub m2: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for BlockMoments {
    fn default() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl BlockMoments {
    /// Combine the moments of two disjoint blocks
    pub fn merge(self, other: Self) -> Self {
        if self.count == 0 {
            return other;
        }
        if other.count == 0 {
            return self;
        }
        let na = self.count as f64;
        let nb = other.count as f64;
        let n = na + nb;
        let delta = other.mean - self.mean;
        Self {
            count: self.count + other.count,
            mean: self.mean + delta * nb / n,
            m2: self.m2 + other.m2 + delta * delta * na * nb / n,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Every value of the block is identical
    pub fn is_constant(&self) -> bool {
        self.count > 0 && self.min == self.max
    }

    /// Mean of the block, exact for a constant block
    pub fn center(&self) -> f64 {
        if self.is_constant() {
            self.min
        } else {
            self.mean
        }
    }

    /// Population variance, 0 for an empty or constant block
    pub fn variance(&self) -> f64 {
        if self.count == 0 || self.is_constant() {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }
}

/// Kernel computing block moments and standardized columns
#[derive(Clone, Debug)]
pub struct ZScoreKernel<T: Numeric = f64, P: ComputePrimitives<T> = ScalarBackend> {
    primitives: P,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Numeric, P: ComputePrimitives<T>> ZScoreKernel<T, P> {
    pub fn new(primitives: P) -> Self {
        Self {
            primitives,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Two-pass moments of a single block
    pub fn block_moments(&self, block: &[T]) -> BlockMoments {
        if block.is_empty() {
            return BlockMoments::default();
        }
        let mean = self.primitives.mean(block);
        let (min, max) = block.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            let x = x.to_f64();
            (lo.min(x), hi.max(x))
        });
        BlockMoments {
            count: block.len(),
            mean,
            m2: self.primitives.sum_squared_deviations(block, mean),
            min,
            max,
        }
    }

    /// Moments of a column processed in blocks of `block_rows`
    pub fn column_moments(&self, column: &[T], block_rows: usize) -> BlockMoments {
        column
            .chunks(block_rows.max(1))
            .map(|block| self.block_moments(block))
            .fold(BlockMoments::default(), BlockMoments::merge)
    }

    /// Write `(x - mean) * inv_scale` for every element of `column`
    pub fn standardize(&self, column: &[T], mean: f64, inv_scale: f64, out: &mut [T]) {
        self.primitives.standardize_into(column, mean, inv_scale, out);
    }
}

impl<T: Numeric, P: ComputePrimitives<T>> StatisticalKernel<T> for ZScoreKernel<T, P> {
    type Primitives = P;

    fn primitives(&self) -> &Self::Primitives {
        &self.primitives
    }

    fn name(&self) -> &'static str {
        "zscore"
    }
}
