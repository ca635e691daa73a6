use crate::error::GradError;
use crate::graph::Graph;
use crate::ops::arithmetic::{add_op, neg_op};

/// `a - b`, expressed as `a + b * (-1)` so it reuses the Add and Mul rules.
pub fn sub_op(a: &Graph, b: &Graph) -> Result<Graph, GradError> {
    add_op(a, &neg_op(b)?)
}
