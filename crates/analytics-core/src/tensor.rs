//! Dense n-dimensional tensors used as initializer targets

use crate::table::try_zeroed;
use crate::{Error, Numeric, Result};

/// Dense row-major tensor
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T: Numeric> {
    dims: Vec<usize>,
    data: Vec<T>,
}

impl<T: Numeric> Tensor<T> {
    /// Zero-filled tensor with the given dimensions
    pub fn zeros(dims: &[usize]) -> Result<Self> {
        let len = element_count(dims)?;
        Ok(Self {
            dims: dims.to_vec(),
            data: try_zeroed(len, 1)?,
        })
    }

    /// Wrap existing data; its length must equal the product of `dims`
    pub fn from_vec(dims: &[usize], data: Vec<T>) -> Result<Self> {
        let len = element_count(dims)?;
        if data.len() != len {
            return Err(Error::size_mismatch(len, data.len(), "tensor data"));
        }
        Ok(Self {
            dims: dims.to_vec(),
            data,
        })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

fn element_count(dims: &[usize]) -> Result<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d)).ok_or_else(|| {
        Error::AllocationFailure(format!("tensor dimensions {dims:?} overflow usize"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let tensor = Tensor::<f32>::zeros(&[4, 3]).unwrap();
        assert_eq!(tensor.dims(), &[4, 3]);
        assert_eq!(tensor.len(), 12);
        assert!(tensor.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Tensor::from_vec(&[2, 2], vec![1.0f64; 4]).is_ok());
        assert!(matches!(
            Tensor::from_vec(&[2, 2], vec![1.0f64; 5]),
            Err(Error::DimensionMismatch { expected: 4, actual: 5, .. })
        ));
        assert!(matches!(
            Tensor::<f64>::zeros(&[usize::MAX, 2]),
            Err(Error::AllocationFailure(_))
        ));
    }
}
