// src/tensor/create.rs

use crate::error::GradError;
use crate::tensor::Tensor;
use crate::types::Shape;
use num_traits::ToPrimitive;
use rand::Rng;
use rand_distr::StandardNormal;

/// Rejects shapes with a zero dimension.
fn checked(shape: Shape) -> Result<Shape, GradError> {
    if shape.is_positive() {
        Ok(shape)
    } else {
        Err(GradError::TensorCreationError {
            data_len: 0,
            shape: shape.to_vec(),
        })
    }
}

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: Shape) -> Result<Tensor, GradError> {
    Ok(Tensor::filled(checked(shape)?, 0.0))
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: Shape) -> Result<Tensor, GradError> {
    Ok(Tensor::filled(checked(shape)?, 1.0))
}

/// Creates a new tensor filled with a specific value with the specified shape.
///
/// Any primitive number is accepted; values that do not fit an `f64`
/// are rejected.
pub fn full<N: ToPrimitive>(shape: Shape, value: N) -> Result<Tensor, GradError> {
    let value = value.to_f64().ok_or_else(|| {
        GradError::ConfigurationError("fill value is not representable as f64".to_string())
    })?;
    Ok(Tensor::filled(checked(shape)?, value))
}

impl Tensor {
    pub fn zeros(shape: Shape) -> Result<Tensor, GradError> {
        zeros(shape)
    }

    pub fn ones(shape: Shape) -> Result<Tensor, GradError> {
        ones(shape)
    }

    pub fn zeros_like(other: &Tensor) -> Tensor {
        Tensor::filled(other.shape(), 0.0)
    }

    pub fn ones_like(other: &Tensor) -> Tensor {
        Tensor::filled(other.shape(), 1.0)
    }

    /// Tensor with elements drawn uniformly from `[0, 1)`.
    pub fn rand(shape: Shape) -> Result<Tensor, GradError> {
        let shape = checked(shape)?;
        let mut rng = rand::thread_rng();
        let data = (0..shape.numel()).map(|_| rng.gen::<f64>()).collect();
        Ok(Tensor::from_parts(shape, data))
    }

    /// Tensor with elements drawn from the standard normal distribution.
    pub fn randn(shape: Shape) -> Result<Tensor, GradError> {
        let shape = checked(shape)?;
        let mut rng = rand::thread_rng();
        let data = (0..shape.numel())
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect();
        Ok(Tensor::from_parts(shape, data))
    }

    /// Identity matrix of size `n x n`.
    pub fn eye(n: usize) -> Result<Tensor, GradError> {
        let mut t = zeros(Shape::new(n, n))?;
        for i in 0..n {
            t.data_mut()[i * n + i] = 1.0;
        }
        Ok(t)
    }
}
