// simplegrad-core/src/ops/arithmetic/add.rs

use crate::error::GradError;
use crate::graph::{Graph, NodeKind};
use crate::ops::broadcast_operands;
use crate::tensor::Tensor;

/// Builds an Add node `a + b`, broadcasting both operands to a common shape.
pub fn add_op(a: &Graph, b: &Graph) -> Result<Graph, GradError> {
    let (shape, left, right) = broadcast_operands(a, b)?;
    Ok(Graph::from_kind(shape, NodeKind::Add(left, right)))
}

pub(crate) fn forward(a: &Tensor, b: &Tensor) -> Result<Tensor, GradError> {
    a.zip_map(b, "add", |x, y| x + y)
}

/// Gradient passes through unchanged to both children.
pub(crate) fn backward(grad: &Tensor, a: &Graph, b: &Graph) -> Result<(), GradError> {
    a.accumulate_grad(grad)?;
    b.accumulate_grad(grad)
}

/// d(a + b) = da + db
pub(crate) fn derivative(a: &Graph, b: &Graph, by: &Graph) -> Result<Graph, GradError> {
    add_op(&a.gradient_graph(by)?, &b.gradient_graph(by)?)
}
