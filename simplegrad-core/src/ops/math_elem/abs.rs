// simplegrad-core/src/ops/math_elem/abs.rs

use crate::error::GradError;
use crate::graph::Graph;
use crate::ops::arithmetic::{mul_op, sub_op};
use crate::ops::lambda::ElementaryFn;
use crate::tensor::Tensor;
use std::rc::Rc;

/// Elementwise absolute value. The gradient at zero is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Abs;

fn signum(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl ElementaryFn for Abs {
    fn name(&self) -> &str {
        "Abs"
    }

    fn forward(&self, input: &Tensor) -> Result<Tensor, GradError> {
        Ok(input.map(f64::abs))
    }

    fn backward(&self, grad: &Tensor, _output: &Tensor, input: &Tensor) -> Result<Tensor, GradError> {
        grad.zip_map(input, "abs backward", |g, x| g * signum(x))
    }

    /// d|x| = dx * sign(x)
    fn derivative(&self, input: &Graph, by: &Graph) -> Result<Graph, GradError> {
        mul_op(&input.gradient_graph(by)?, &input.sign()?)
    }
}

impl Graph {
    pub fn abs(&self) -> Result<Graph, GradError> {
        Graph::lambda(self, Rc::new(Abs))
    }

    /// -1, 0 or 1 per element, built from comparisons so it carries no
    /// gradient: `((x > 0) * 2 - 1) * (x != 0)`.
    pub fn sign(&self) -> Result<Graph, GradError> {
        let positive = self.greater(0.0)?;
        let unit = sub_op(&mul_op(&positive, &Graph::constant(2.0))?, &Graph::constant(1.0))?;
        mul_op(&unit, &self.not_equal(0.0)?)
    }
}
