//! Task descriptors for neural-network weight initializers
//!
//! [`XavierTaskDescriptor::build`] gathers the random engine, the layer shape
//! and the target tensor of one Xavier initialization. Drawing the values is
//! left to a [`RandomFillKernel`].
//!
//! ```rust
//! use analytics_core::Tensor;
//! use analytics_initializers::{
//!     DenseShape, InitializerResult, LayerShape, XavierParameter, XavierTaskDescriptor,
//! };
//! use rand::rngs::mock::StepRng;
//! use std::{cell::RefCell, rc::Rc};
//!
//! let parameter = XavierParameter::new(
//!     Rc::new(RefCell::new(StepRng::new(0, 1))),
//!     Rc::new(DenseShape::fully_connected(2, 1)),
//! );
//! let mut result = InitializerResult::with_value(Tensor::<f32>::zeros(&[1, 2]).unwrap());
//!
//! let task = XavierTaskDescriptor::build(&mut result, &parameter).unwrap();
//! assert_eq!(task.layer().fan_in(), 2);
//! assert_eq!(task.uniform_bound(), 2.0f64.sqrt());
//! ```

pub mod descriptor;
pub mod kernel;
pub mod layer;
pub mod parameter;
pub mod result;

pub use descriptor::{xavier_uniform_bound, XavierTaskDescriptor};
pub use kernel::{RandomFillKernel, XavierInitializer};
pub use layer::{DenseShape, LayerShape};
pub use parameter::XavierParameter;
pub use result::{InitializerResult, InitializerResultId};

pub use analytics_core::{Error, Result};
