// simplegrad-core/src/ops/reduction/sum.rs

use crate::error::GradError;
use crate::graph::Graph;
use crate::ops::lambda::ElementaryFn;
use crate::tensor::Tensor;
use crate::types::Shape;
use std::rc::Rc;

/// Sum along `axis` (0 = rows, 1 = columns), keeping the reduced dimension
/// with size 1. `None` sums every element into a `(1, 1)` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sum {
    pub axis: Option<usize>,
}

impl ElementaryFn for Sum {
    fn name(&self) -> &str {
        "Sum"
    }

    fn output_shape(&self, input: Shape) -> Result<Shape, GradError> {
        match self.axis {
            None => Ok(Shape::SCALAR),
            Some(0) => Ok(Shape::new(1, input.cols)),
            Some(1) => Ok(Shape::new(input.rows, 1)),
            Some(axis) => Err(GradError::InvalidAxis { axis }),
        }
    }

    fn forward(&self, input: &Tensor) -> Result<Tensor, GradError> {
        input.sum(self.axis)
    }

    /// Every summed element receives the gradient of its reduced slot.
    fn backward(&self, grad: &Tensor, _output: &Tensor, input: &Tensor) -> Result<Tensor, GradError> {
        grad.broadcast_to(input.shape())
    }

    fn derivative(&self, input: &Graph, by: &Graph) -> Result<Graph, GradError> {
        input.gradient_graph(by)?.sum(self.axis)
    }
}

impl Graph {
    /// Sum along `axis`; see [`Sum`].
    pub fn sum(&self, axis: Option<usize>) -> Result<Graph, GradError> {
        Graph::lambda(self, Rc::new(Sum { axis }))
    }

    /// Sum of every element.
    pub fn sum_all(&self) -> Result<Graph, GradError> {
        self.sum(None)
    }
}
