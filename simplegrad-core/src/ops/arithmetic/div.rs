use crate::error::GradError;
use crate::graph::Graph;
use crate::ops::arithmetic::{mul_op, pow_op};

/// `a / b`, expressed as `a * b ^ (-1)`.
///
/// A zero in `b` surfaces as [`GradError::DivisionByZero`] from `forward()`.
pub fn div_op(a: &Graph, b: &Graph) -> Result<Graph, GradError> {
    mul_op(a, &pow_op(b, &Graph::constant(-1.0))?)
}
