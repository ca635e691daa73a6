use crate::error::GradError;
use crate::graph::{Graph, NodeKind};
use crate::ops::arithmetic::add_op;
use crate::tensor::Tensor;
use crate::types::Shape;

/// Builds a matrix-product node `a @ b`.
///
/// A: [M, K], B: [K, N] -> C: [M, N]. No broadcasting is applied.
pub fn matmul_op(a: &Graph, b: &Graph) -> Result<Graph, GradError> {
    let a_shape = a.shape();
    let b_shape = b.shape();
    if a_shape.cols != b_shape.rows {
        return Err(GradError::IncompatibleShapes {
            shape1: a_shape,
            shape2: b_shape,
            operation: "matmul".to_string(),
        });
    }
    let shape = Shape::new(a_shape.rows, b_shape.cols);
    Ok(Graph::from_kind(
        shape,
        NodeKind::MatMul(a.graph_copy(), b.graph_copy()),
    ))
}

/// dL/dA = grad @ B^T, dL/dB = A^T @ grad
pub(crate) fn backward(grad: &Tensor, a: &Graph, b: &Graph) -> Result<(), GradError> {
    let a_value = a.forward_value()?;
    let b_value = b.forward_value()?;
    a.accumulate_grad(&grad.matmul(&b_value.transpose())?)?;
    b.accumulate_grad(&a_value.transpose().matmul(grad)?)
}

/// d(A @ B) = dA @ B + A @ dB
pub(crate) fn derivative(a: &Graph, b: &Graph, by: &Graph) -> Result<Graph, GradError> {
    let left = matmul_op(&a.gradient_graph(by)?, b)?;
    let right = matmul_op(a, &b.gradient_graph(by)?)?;
    add_op(&left, &right)
}

impl Graph {
    /// Matrix product `self @ other`.
    pub fn matmul(&self, other: impl Into<Graph>) -> Result<Graph, GradError> {
        matmul_op(self, &other.into())
    }
}
