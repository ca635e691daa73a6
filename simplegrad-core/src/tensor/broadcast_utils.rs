use crate::error::GradError;
use crate::tensor::Tensor;
use crate::types::Shape;

/// Computes the broadcast shape of two 2-D shapes.
///
/// Each dimension must either match or be 1 on one side. Zero-sized
/// dimensions never broadcast.
pub fn broadcast_shapes(a: Shape, b: Shape) -> Result<Shape, GradError> {
    if !a.is_positive() || !b.is_positive() {
        return Err(GradError::BroadcastError {
            shape1: a,
            shape2: b,
        });
    }
    let dim = |x: usize, y: usize| -> Option<usize> {
        if x == y || y == 1 {
            Some(x)
        } else if x == 1 {
            Some(y)
        } else {
            None
        }
    };
    match (dim(a.rows, b.rows), dim(a.cols, b.cols)) {
        (Some(rows), Some(cols)) => Ok(Shape::new(rows, cols)),
        _ => Err(GradError::BroadcastError {
            shape1: a,
            shape2: b,
        }),
    }
}

impl Tensor {
    /// Expands size-1 dimensions so the tensor takes the target shape.
    pub fn broadcast_to(&self, target: Shape) -> Result<Tensor, GradError> {
        let shape = self.shape();
        if shape == target {
            return Ok(self.clone());
        }
        if broadcast_shapes(shape, target)? != target {
            return Err(GradError::BroadcastError {
                shape1: shape,
                shape2: target,
            });
        }
        let mut data = Vec::with_capacity(target.numel());
        for r in 0..target.rows {
            let src_r = if shape.rows == 1 { 0 } else { r };
            for c in 0..target.cols {
                let src_c = if shape.cols == 1 { 0 } else { c };
                data.push(self.data()[src_r * shape.cols + src_c]);
            }
        }
        Ok(Tensor::from_parts(target, data))
    }

    /// Binary elementwise kernel with broadcasting of both operands.
    pub fn broadcast_zip(
        &self,
        other: &Tensor,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Tensor, GradError> {
        let out_shape = broadcast_shapes(self.shape(), other.shape())?;
        let a = self.broadcast_to(out_shape)?;
        let b = other.broadcast_to(out_shape)?;
        a.zip_map(&b, "broadcast_zip", f)
    }

    /// Reduces the tensor (gradient) to match a target shape by summing along broadcasted dimensions.
    ///
    /// Crucial for backward pass of broadcasting ops.
    pub fn reduce_to_shape(&self, target: Shape) -> Result<Tensor, GradError> {
        let shape = self.shape();
        if shape == target {
            return Ok(self.clone());
        }
        if broadcast_shapes(target, shape)? != shape {
            return Err(GradError::BroadcastError {
                shape1: shape,
                shape2: target,
            });
        }
        let mut reduced = self.clone();
        if target.rows == 1 && shape.rows != 1 {
            reduced = reduced.sum(Some(0))?;
        }
        if target.cols == 1 && shape.cols != 1 {
            reduced = reduced.sum(Some(1))?;
        }
        Ok(reduced)
    }
}
