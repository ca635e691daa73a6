// simplegrad-core/src/ops/math_elem/ln.rs

use crate::error::GradError;
use crate::graph::Graph;
use crate::ops::arithmetic::div_op;
use crate::ops::lambda::ElementaryFn;
use crate::tensor::Tensor;
use std::rc::Rc;

/// Elementwise natural logarithm.
///
/// Non-positive inputs produce NaN or -inf, following `f64::ln`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ln;

impl ElementaryFn for Ln {
    fn name(&self) -> &str {
        "Ln"
    }

    fn forward(&self, input: &Tensor) -> Result<Tensor, GradError> {
        Ok(input.map(f64::ln))
    }

    /// dL/dx = grad / x
    fn backward(&self, grad: &Tensor, _output: &Tensor, input: &Tensor) -> Result<Tensor, GradError> {
        grad.zip_map(input, "ln backward", |g, x| g / x)
    }

    fn derivative(&self, input: &Graph, by: &Graph) -> Result<Graph, GradError> {
        div_op(&input.gradient_graph(by)?, input)
    }
}

impl Graph {
    pub fn ln(&self) -> Result<Graph, GradError> {
        Graph::lambda(self, Rc::new(Ln))
    }
}
