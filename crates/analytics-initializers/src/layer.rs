//! Layer shapes consumed by weight initializers

/// Provides the fan-in and fan-out of a layer's weight tensor
pub trait LayerShape {
    /// Number of input connections feeding one output unit
    fn fan_in(&self) -> usize;

    /// Number of output connections fed by one input unit
    fn fan_out(&self) -> usize;
}

/// Shape of a weight tensor laid out as `[out, in, kernel...]`
///
/// Fans are multiplied by the receptive field size (the product of the
/// trailing kernel dimensions). A 1-D shape `[len]` is treated as a bias-like
/// vector with fan-in 1 and fan-out `len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseShape {
    dims: Vec<usize>,
}

impl DenseShape {
    pub fn new(dims: &[usize]) -> Self {
        Self {
            dims: dims.to_vec(),
        }
    }

    /// Fully connected layer mapping `inputs` units to `outputs` units
    pub fn fully_connected(inputs: usize, outputs: usize) -> Self {
        Self::new(&[outputs, inputs])
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn receptive_field(&self) -> usize {
        self.dims.iter().skip(2).product()
    }
}

impl LayerShape for DenseShape {
    fn fan_in(&self) -> usize {
        match self.dims.as_slice() {
            [] | [_] => 1,
            [_, inputs, ..] => inputs * self.receptive_field(),
        }
    }

    fn fan_out(&self) -> usize {
        match self.dims.as_slice() {
            [] => 1,
            [len] => *len,
            [outputs, ..] => outputs * self.receptive_field(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_connected_fans() {
        let shape = DenseShape::fully_connected(784, 128);
        assert_eq!(shape.dims(), &[128, 784]);
        assert_eq!(shape.fan_in(), 784);
        assert_eq!(shape.fan_out(), 128);
    }

    #[test]
    fn test_convolution_fans() {
        // 16 filters over 3 channels with 5x5 kernels
        let shape = DenseShape::new(&[16, 3, 5, 5]);
        assert_eq!(shape.fan_in(), 75);
        assert_eq!(shape.fan_out(), 400);
    }

    #[test]
    fn test_vector_fans() {
        let shape = DenseShape::new(&[10]);
        assert_eq!((shape.fan_in(), shape.fan_out()), (1, 10));
        let scalar = DenseShape::new(&[]);
        assert_eq!((scalar.fan_in(), scalar.fan_out()), (1, 1));
    }
}
