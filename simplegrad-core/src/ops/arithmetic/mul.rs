// simplegrad-core/src/ops/arithmetic/mul.rs

use crate::error::GradError;
use crate::graph::{Graph, NodeKind};
use crate::ops::arithmetic::add_op;
use crate::ops::broadcast_operands;
use crate::tensor::Tensor;

/// Builds a Mul node `a * b` (elementwise), broadcasting both operands.
pub fn mul_op(a: &Graph, b: &Graph) -> Result<Graph, GradError> {
    let (shape, left, right) = broadcast_operands(a, b)?;
    Ok(Graph::from_kind(shape, NodeKind::Mul(left, right)))
}

pub(crate) fn forward(a: &Tensor, b: &Tensor) -> Result<Tensor, GradError> {
    a.zip_map(b, "mul", |x, y| x * y)
}

/// Product rule: `a` receives `grad * b`, `b` receives `grad * a`.
pub(crate) fn backward(grad: &Tensor, a: &Graph, b: &Graph) -> Result<(), GradError> {
    let a_value = a.forward_value()?;
    let b_value = b.forward_value()?;
    a.accumulate_grad(&grad.zip_map(&b_value, "mul backward", |g, y| g * y)?)?;
    b.accumulate_grad(&grad.zip_map(&a_value, "mul backward", |g, x| g * x)?)
}

/// d(a * b) = a * db + b * da
pub(crate) fn derivative(a: &Graph, b: &Graph, by: &Graph) -> Result<Graph, GradError> {
    let left = mul_op(a, &b.gradient_graph(by)?)?;
    let right = mul_op(b, &a.gradient_graph(by)?)?;
    add_op(&left, &right)
}
