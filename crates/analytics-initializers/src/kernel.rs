//! Fill kernels and the Xavier initializer entry point

use crate::descriptor::XavierTaskDescriptor;
use crate::layer::LayerShape;
use crate::parameter::XavierParameter;
use crate::result::InitializerResult;
use analytics_core::{Numeric, Result};
use rand::RngCore;
use tracing::{debug, instrument};

/// Consumes a task descriptor and writes random values into its target
pub trait RandomFillKernel<E, L, T: Numeric> {
    fn fill(&self, task: XavierTaskDescriptor<'_, E, L, T>) -> Result<()>;
}

/// Xavier (Glorot) weight initializer
#[derive(Debug, Clone, Copy, Default)]
pub struct XavierInitializer;

impl XavierInitializer {
    /// Build the task for `result` and `parameter` and hand it to `kernel`
    #[instrument(level = "debug", skip_all)]
    pub fn initialize<E, L, T, K>(
        result: &mut InitializerResult<T>,
        parameter: &XavierParameter<E, L>,
        kernel: &K,
    ) -> Result<()>
    where
        E: RngCore,
        L: LayerShape,
        T: Numeric,
        K: RandomFillKernel<E, L, T>,
    {
        let task = XavierTaskDescriptor::build(result, parameter)?;
        debug!(bound = task.uniform_bound(), "filling target");
        kernel.fill(task)
    }
}
