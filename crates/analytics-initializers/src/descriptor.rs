//! Xavier initialization task descriptor
//!
//! Building a descriptor only gathers borrowed references to the random
//! engine, the layer and the target tensor. Nothing is drawn and no scale is
//! computed until a [`RandomFillKernel`](crate::RandomFillKernel) consumes it.

use crate::layer::LayerShape;
use crate::parameter::XavierParameter;
use crate::result::InitializerResult;
use analytics_core::{Error, Numeric, Result, Status, Tensor};
use rand::RngCore;
use std::cell::RefCell;
use tracing::{debug, instrument};

/// Half-width `sqrt(6 / (fan_in + fan_out))` of the Xavier uniform range
///
/// Returns 0 when both fans are 0.
pub fn xavier_uniform_bound(fan_in: usize, fan_out: usize) -> f64 {
    let fans = fan_in + fan_out;
    if fans == 0 {
        return 0.0;
    }
    (6.0 / fans as f64).sqrt()
}

/// Borrowed engine, layer and target tensor of one initialization
///
/// Lives no longer than the parameter and result it was built from.
pub struct XavierTaskDescriptor<'a, E, L, T: Numeric> {
    engine: &'a RefCell<E>,
    layer: &'a L,
    target: &'a mut Tensor<T>,
}

impl<'a, E, L, T> XavierTaskDescriptor<'a, E, L, T>
where
    E: RngCore,
    L: LayerShape,
    T: Numeric,
{
    /// Collect the references held by `parameter` and the `Value` slot of `result`
    ///
    /// Fails with [`Error::NullEngineOrLayer`] when the engine or the layer is
    /// unset and [`Error::MissingTargetTensor`] when no tensor is registered.
    /// Both problems together are reported as [`Error::Composite`].
    #[instrument(level = "debug", skip_all)]
    pub fn build(
        result: &'a mut InitializerResult<T>,
        parameter: &'a XavierParameter<E, L>,
    ) -> Result<Self> {
        let sources = parameter.engine.as_deref().zip(parameter.layer.as_deref());
        match (sources, result.value_mut()) {
            (Some((engine, layer)), Some(target)) => {
                debug!(
                    fan_in = layer.fan_in(),
                    fan_out = layer.fan_out(),
                    target_len = target.len(),
                    "built xavier task"
                );
                Ok(Self {
                    engine,
                    layer,
                    target,
                })
            }
            (sources, target) => {
                let mut status = Status::new();
                if sources.is_none() {
                    status.push(Error::NullEngineOrLayer);
                }
                if target.is_none() {
                    status.push(Error::MissingTargetTensor);
                }
                Err(status.into_error().unwrap_or(Error::NullEngineOrLayer))
            }
        }
    }

    pub fn engine(&self) -> &'a RefCell<E> {
        self.engine
    }

    pub fn layer(&self) -> &'a L {
        self.layer
    }

    pub fn target(&self) -> &Tensor<T> {
        self.target
    }

    pub fn target_mut(&mut self) -> &mut Tensor<T> {
        self.target
    }

    /// Half-width of the uniform range for this layer
    pub fn uniform_bound(&self) -> f64 {
        xavier_uniform_bound(self.layer.fan_in(), self.layer.fan_out())
    }

    /// Split into the engine, layer and target, so a kernel can draw from the
    /// engine while writing the target
    pub fn into_parts(self) -> (&'a RefCell<E>, &'a L, &'a mut Tensor<T>) {
        (self.engine, self.layer, self.target)
    }
}
