// simplegrad-core/src/ops/math_elem/exp.rs

use crate::error::GradError;
use crate::graph::Graph;
use crate::ops::arithmetic::mul_op;
use crate::ops::lambda::ElementaryFn;
use crate::tensor::Tensor;
use crate::types::Shape;
use std::rc::Rc;

/// Elementwise `e^x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exp;

impl ElementaryFn for Exp {
    fn name(&self) -> &str {
        "Exp"
    }

    fn forward(&self, input: &Tensor) -> Result<Tensor, GradError> {
        Ok(input.map(f64::exp))
    }

    fn backward(&self, grad: &Tensor, output: &Tensor, _input: &Tensor) -> Result<Tensor, GradError> {
        grad.zip_map(output, "exp backward", |g, y| g * y)
    }

    /// d(e^x) = e^x * dx
    fn derivative(&self, input: &Graph, by: &Graph) -> Result<Graph, GradError> {
        mul_op(&input.exp()?, &input.gradient_graph(by)?)
    }
}

/// `e^(x - max(x))` along `axis` (`None` for the global maximum).
///
/// The shift keeps softmax numerically stable. The maximum is treated as a
/// constant when differentiating, which leaves softmax gradients unchanged
/// since the shift cancels between numerator and denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpSubMax {
    pub axis: Option<usize>,
}

impl ElementaryFn for ExpSubMax {
    fn name(&self) -> &str {
        "ExpSubMax"
    }

    fn output_shape(&self, input: Shape) -> Result<Shape, GradError> {
        match self.axis {
            None | Some(0) | Some(1) => Ok(input),
            Some(axis) => Err(GradError::InvalidAxis { axis }),
        }
    }

    fn forward(&self, input: &Tensor) -> Result<Tensor, GradError> {
        let max = input.max(self.axis)?;
        input.broadcast_zip(&max, |x, m| (x - m).exp())
    }

    fn backward(&self, grad: &Tensor, output: &Tensor, _input: &Tensor) -> Result<Tensor, GradError> {
        grad.zip_map(output, "exp_sub_max backward", |g, y| g * y)
    }

    fn derivative(&self, input: &Graph, by: &Graph) -> Result<Graph, GradError> {
        mul_op(&input.exp_sub_max(self.axis)?, &input.gradient_graph(by)?)
    }
}

impl Graph {
    pub fn exp(&self) -> Result<Graph, GradError> {
        Graph::lambda(self, Rc::new(Exp))
    }

    /// Max-shifted exponential; see [`ExpSubMax`].
    pub fn exp_sub_max(&self, axis: Option<usize>) -> Result<Graph, GradError> {
        Graph::lambda(self, Rc::new(ExpSubMax { axis }))
    }
}
