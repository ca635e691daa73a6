// simplegrad-core/src/ops/arithmetic/pow.rs

use crate::error::GradError;
use crate::graph::{Graph, NodeKind};
use crate::ops::arithmetic::{add_op, mul_op, sub_op};
use crate::ops::broadcast_operands;
use crate::tensor::Tensor;

/// Builds a Pow node `base ^ exponent` (elementwise), broadcasting both operands.
pub fn pow_op(base: &Graph, exponent: &Graph) -> Result<Graph, GradError> {
    let (shape, left, right) = broadcast_operands(base, exponent)?;
    Ok(Graph::from_kind(shape, NodeKind::Pow(left, right)))
}

/// Raises each element of `base` to the matching element of `exponent`.
///
/// A zero base with a negative exponent is a division by zero.
pub(crate) fn forward(base: &Tensor, exponent: &Tensor) -> Result<Tensor, GradError> {
    let divides_by_zero = base
        .data()
        .iter()
        .zip(exponent.data())
        .any(|(&b, &e)| b == 0.0 && e < 0.0);
    if divides_by_zero {
        return Err(GradError::DivisionByZero);
    }
    base.zip_map(exponent, "pow", f64::powf)
}

/// d(b^e)/db = e * b^(e-1); d(b^e)/de = b^e * ln(b).
///
/// The exponent only receives gradient when it requires grad itself, so a
/// constant exponent over a non-positive base never evaluates `ln`.
pub(crate) fn backward(grad: &Tensor, base: &Graph, exponent: &Graph) -> Result<(), GradError> {
    let b = base.forward_value()?;
    let e = exponent.forward_value()?;

    let local = b.zip_map(&e, "pow backward", |x, n| n * x.powf(n - 1.0))?;
    base.accumulate_grad(&grad.zip_map(&local, "pow backward", |g, l| g * l)?)?;

    if exponent.requires_grad() {
        let local = b.zip_map(&e, "pow backward", |x, n| x.powf(n) * x.ln())?;
        exponent.accumulate_grad(&grad.zip_map(&local, "pow backward", |g, l| g * l)?)?;
    }
    Ok(())
}

/// Symbolic derivative of `base ^ exponent`, keeping only the terms whose
/// operand depends on `by`.
pub(crate) fn derivative(base: &Graph, exponent: &Graph, by: &Graph) -> Result<Graph, GradError> {
    let base_term = || -> Result<Graph, GradError> {
        // exponent * base^(exponent - 1) * d(base)
        let lowered = pow_op(base, &sub_op(exponent, &Graph::constant(1.0))?)?;
        mul_op(&mul_op(&lowered, exponent)?, &base.gradient_graph(by)?)
    };
    let exponent_term = || -> Result<Graph, GradError> {
        // ln(base) * base^exponent * d(exponent)
        let power = pow_op(base, exponent)?;
        mul_op(&mul_op(&base.ln()?, &power)?, &exponent.gradient_graph(by)?)
    };

    match (base.depends_on(by), exponent.depends_on(by)) {
        (true, false) => base_term(),
        (false, true) => exponent_term(),
        _ => add_op(&base_term()?, &exponent_term()?),
    }
}

impl Graph {
    /// Elementwise `self ^ exponent`.
    pub fn pow(&self, exponent: impl Into<Graph>) -> Result<Graph, GradError> {
        pow_op(self, &exponent.into())
    }
}
