use crate::error::GradError;
use crate::graph::Graph;
use crate::ops::arithmetic::mul_op;

/// `-a`, expressed as `a * (-1)`.
pub fn neg_op(a: &Graph) -> Result<Graph, GradError> {
    mul_op(a, &Graph::constant(-1.0))
}
