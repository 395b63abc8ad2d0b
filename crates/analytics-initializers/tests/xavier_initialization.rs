//! Xavier initialization through a user-supplied fill kernel

use analytics_core::{Error, Numeric, Tensor};
use analytics_initializers::{
    xavier_uniform_bound, DenseShape, InitializerResult, LayerShape, RandomFillKernel,
    XavierInitializer, XavierParameter, XavierTaskDescriptor,
};
use approx::assert_relative_eq;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};
use std::cell::RefCell;
use std::rc::Rc;

/// Draws from U(-b, b) with `b` the Xavier uniform bound
struct UniformFill;

impl<E: RngCore, L: LayerShape, T: Numeric> RandomFillKernel<E, L, T> for UniformFill {
    fn fill(&self, task: XavierTaskDescriptor<'_, E, L, T>) -> analytics_core::Result<()> {
        let bound = task.uniform_bound();
        let (engine, _layer, target) = task.into_parts();
        let dist = Uniform::new_inclusive(-bound, bound);
        let mut rng = engine.borrow_mut();
        for x in target.as_mut_slice() {
            *x = T::from_f64(dist.sample(&mut *rng));
        }
        Ok(())
    }
}

fn shared_engine(seed: u64) -> Rc<RefCell<ChaCha8Rng>> {
    Rc::new(RefCell::new(ChaCha8Rng::seed_from_u64(seed)))
}

#[test]
fn test_values_stay_within_bound() {
    let layer = Rc::new(DenseShape::fully_connected(256, 64));
    let parameter = XavierParameter::new(shared_engine(42), layer.clone());
    let mut result = InitializerResult::with_value(Tensor::<f32>::zeros(&[64, 256]).unwrap());

    XavierInitializer::initialize(&mut result, &parameter, &UniformFill).unwrap();

    let bound = xavier_uniform_bound(layer.fan_in(), layer.fan_out());
    assert_relative_eq!(bound, (6.0f64 / 320.0).sqrt());

    let values = result.value().unwrap().as_slice();
    assert!(values.iter().all(|&x| (x as f64).abs() <= bound + 1e-6));

    // U(-b, b) has variance b²/3
    let n = values.len() as f64;
    let mean = values.iter().map(|&x| x as f64).sum::<f64>() / n;
    let var = values.iter().map(|&x| (x as f64 - mean).powi(2)).sum::<f64>() / n;
    assert!(mean.abs() < 0.01);
    assert_relative_eq!(var, bound * bound / 3.0, max_relative = 0.05);
}

#[test]
fn test_engine_state_is_shared_between_layers() {
    let engine = shared_engine(7);
    let first = XavierParameter::new(engine.clone(), Rc::new(DenseShape::new(&[4, 4])));
    let second = XavierParameter::new(engine.clone(), Rc::new(DenseShape::new(&[4, 4])));

    let mut a = InitializerResult::with_value(Tensor::<f64>::zeros(&[4, 4]).unwrap());
    let mut b = InitializerResult::with_value(Tensor::<f64>::zeros(&[4, 4]).unwrap());
    XavierInitializer::initialize(&mut a, &first, &UniformFill).unwrap();
    XavierInitializer::initialize(&mut b, &second, &UniformFill).unwrap();

    // the second layer continues the stream rather than restarting it
    assert_ne!(a.value(), b.value());

    let replay = XavierParameter::new(shared_engine(7), Rc::new(DenseShape::new(&[4, 4])));
    let mut c = InitializerResult::with_value(Tensor::<f64>::zeros(&[4, 4]).unwrap());
    XavierInitializer::initialize(&mut c, &replay, &UniformFill).unwrap();
    assert_eq!(a.value(), c.value());
}

#[test]
fn test_convolution_target() {
    let layer = Rc::new(DenseShape::new(&[8, 3, 3, 3]));
    let parameter = XavierParameter::new(shared_engine(1), layer);
    let mut result = InitializerResult::with_value(Tensor::<f64>::zeros(&[8, 3, 3, 3]).unwrap());

    let task = XavierTaskDescriptor::build(&mut result, &parameter).unwrap();
    assert_eq!(task.layer().fan_in(), 27);
    assert_eq!(task.layer().fan_out(), 72);
    assert_eq!(task.target().dims(), &[8, 3, 3, 3]);
    assert_relative_eq!(task.uniform_bound(), (6.0f64 / 99.0).sqrt());
}

#[test]
fn test_descriptor_errors() {
    let mut empty = InitializerResult::<f32>::new();
    let no_layer =
        XavierParameter::<ChaCha8Rng, DenseShape>::default().with_engine(shared_engine(0));

    let err = XavierInitializer::initialize(&mut empty, &no_layer, &UniformFill).unwrap_err();
    assert!(matches!(err, Error::Composite(_)));
    assert_eq!(err.to_string().matches("Target tensor").count(), 1);

    empty.set_value(Tensor::zeros(&[2]).unwrap());
    assert!(matches!(
        XavierInitializer::initialize(&mut empty, &no_layer, &UniformFill),
        Err(Error::NullEngineOrLayer)
    ));
    assert_eq!(empty.take_value().unwrap().as_slice(), &[0.0, 0.0]);
}
