// src/tensor/mod.rs

use crate::error::GradError;
use crate::types::Shape;
use std::fmt;

pub mod broadcast_utils;
pub mod create;
mod linalg;
mod reduction_methods;

pub use broadcast_utils::broadcast_shapes;
pub use create::{full, ones, zeros};


/// Dense row-major 2-D tensor of `f64` values.
///
/// `Tensor` is a plain value: cloning copies the data. Graph nodes own
/// their payloads, gradients and cached forward results as tensors.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f64>,
    shape: Shape,
}

impl Tensor {
    /// Creates a tensor from raw data and a shape of rank 0, 1 or 2.
    ///
    /// Rank 0 becomes `(1, 1)` and rank 1 becomes a column `(n, 1)`.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, GradError> {
        let normalized = match shape.as_slice() {
            [] => Shape::SCALAR,
            [n] => Shape::new(*n, 1),
            [rows, cols] => Shape::new(*rows, *cols),
            _ => {
                return Err(GradError::InvalidRank {
                    rank: shape.len(),
                    operation: "Tensor::new".to_string(),
                })
            }
        };
        if !normalized.is_positive() || data.len() != normalized.numel() {
            return Err(GradError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Tensor {
            data,
            shape: normalized,
        })
    }

    /// Creates a tensor directly from data and a normalized shape.
    pub fn from_shape_vec(shape: Shape, data: Vec<f64>) -> Result<Self, GradError> {
        Tensor::new(data, shape.to_vec())
    }

    /// Builds a tensor from row vectors. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GradError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let data: Vec<f64> = rows.into_iter().flatten().collect();
        Tensor::new(data, vec![n_rows, n_cols])
    }

    /// A `(1, 1)` tensor holding `value`.
    pub fn scalar(value: f64) -> Self {
        Tensor {
            data: vec![value],
            shape: Shape::SCALAR,
        }
    }

    // Internal constructor for kernels that already guarantee a positive
    // shape and `data.len() == shape.numel()`.
    pub(crate) fn from_parts(shape: Shape, data: Vec<f64>) -> Self {
        debug_assert!(shape.is_positive());
        debug_assert_eq!(data.len(), shape.numel());
        Tensor { data, shape }
    }

    /// Constant tensor over a shape taken from an existing tensor or node.
    pub(crate) fn filled(shape: Shape, value: f64) -> Self {
        Tensor::from_parts(shape, vec![value; shape.numel()])
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Row-major view of the elements.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Element at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.shape.rows && col < self.shape.cols {
            Some(self.data[row * self.shape.cols + col])
        } else {
            None
        }
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Returns the single element of a `(1, 1)` tensor.
    pub fn to_scalar(&self) -> Result<f64, GradError> {
        if !self.shape.is_scalar() {
            return Err(GradError::NonScalar { shape: self.shape });
        }
        Ok(self.data[0])
    }

    pub fn to_vec2(&self) -> Vec<Vec<f64>> {
        self.data
            .chunks(self.shape.cols)
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Applies `f` to every element.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Tensor {
        Tensor::from_parts(self.shape, self.data.iter().map(|&x| f(x)).collect())
    }

    /// Combines two tensors of identical shape element by element.
    pub fn zip_map(
        &self,
        other: &Tensor,
        operation: &str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Tensor, GradError> {
        if self.shape != other.shape {
            return Err(GradError::ShapeMismatch {
                expected: self.shape,
                actual: other.shape,
                operation: operation.to_string(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Tensor::from_parts(self.shape, data))
    }

    /// Adds `other` into `self` in place. Shapes must match exactly.
    pub fn add_assign(&mut self, other: &Tensor) -> Result<(), GradError> {
        if self.shape != other.shape {
            return Err(GradError::GradientAccumulationShapeMismatch {
                expected: self.shape,
                actual: other.shape,
            });
        }
        self.data
            .iter_mut()
            .zip(other.data.iter())
            .for_each(|(a, &b)| *a += b);
        Ok(())
    }

    pub fn add(&self, other: &Tensor) -> Result<Tensor, GradError> {
        self.broadcast_zip(other, |a, b| a + b)
    }

    pub fn sub(&self, other: &Tensor) -> Result<Tensor, GradError> {
        self.broadcast_zip(other, |a, b| a - b)
    }

    pub fn mul(&self, other: &Tensor) -> Result<Tensor, GradError> {
        self.broadcast_zip(other, |a, b| a * b)
    }

    pub fn scale(&self, factor: f64) -> Tensor {
        self.map(|x| x * factor)
    }

    /// Largest absolute elementwise difference to `other` (same shape required).
    pub fn max_abs_diff(&self, other: &Tensor) -> Result<f64, GradError> {
        let diff = self.zip_map(other, "max_abs_diff", |a, b| (a - b).abs())?;
        Ok(diff.data.iter().cloned().fold(0.0, f64::max))
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor(shape={}, data={:?})", self.shape, self.to_vec2())
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.data.chunks(self.shape.cols).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", row)?;
        }
        write!(f, "]")
    }
}

impl From<f64> for Tensor {
    fn from(value: f64) -> Self {
        Tensor::scalar(value)
    }
}

impl TryFrom<Vec<f64>> for Tensor {
    type Error = GradError;

    /// A column vector `(n, 1)`. An empty vector is rejected.
    fn try_from(values: Vec<f64>) -> Result<Self, GradError> {
        let len = values.len();
        Tensor::new(values, vec![len])
    }
}

/// Compile-time guard: array literals must have at least one row and column.
struct NonEmpty<const R: usize, const C: usize>;

impl<const R: usize, const C: usize> NonEmpty<R, C> {
    const CHECK: () = assert!(R > 0 && C > 0, "tensor literals need positive dimensions");
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Tensor {
    /// Row-major literal. Zero-sized literals do not compile:
    ///
    /// ```compile_fail
    /// let _ = simplegrad_core::Tensor::from([[0.0f64; 0]; 2]);
    /// ```
    fn from(rows: [[f64; C]; R]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = NonEmpty::<R, C>::CHECK;
        Tensor::from_parts(Shape::new(R, C), rows.iter().flatten().copied().collect())
    }
}
