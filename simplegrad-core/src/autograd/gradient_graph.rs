use crate::error::GradError;
use crate::graph::{Graph, NodeKind};
use crate::ops::arithmetic::{add, mul, pow};
use crate::ops::lambda;
use crate::ops::linalg::matmul;
use crate::tensor::Tensor;

impl Graph {
    /// Builds a new graph for the elementwise partial derivative of this
    /// expression with respect to the Variable `by`.
    ///
    /// The result has the shape of `self` and is itself evaluable and
    /// differentiable. When `by` is not reachable from this node the zero
    /// graph is returned without visiting the subtree.
    pub fn gradient_graph(&self, by: &Graph) -> Result<Graph, GradError> {
        if !by.is_variable() {
            return Err(GradError::NotAVariable {
                operation: "gradient_graph".to_string(),
            });
        }
        if !self.depends_on(by) {
            return Ok(Graph::zeros(self.shape()));
        }
        match &self.node.kind {
            NodeKind::Value(_) | NodeKind::Compare(..) => Ok(Graph::zeros(self.shape())),
            NodeKind::Variable(_) => {
                if self.id() == by.id() {
                    Ok(Graph::value(Tensor::filled(self.shape(), 1.0)))
                } else {
                    Ok(Graph::zeros(self.shape()))
                }
            }
            NodeKind::Add(a, b) => add::derivative(a, b, by),
            NodeKind::Mul(a, b) => mul::derivative(a, b, by),
            NodeKind::Pow(a, b) => pow::derivative(a, b, by),
            NodeKind::MatMul(a, b) => matmul::derivative(a, b, by),
            NodeKind::Lambda(input, f) => lambda::derivative(self, input, f, by),
        }
    }
}
