// simplegrad-core/src/ops/view/expand.rs

use crate::error::GradError;
use crate::graph::Graph;
use crate::ops::lambda::ElementaryFn;
use crate::tensor::{broadcast_shapes, Tensor};
use crate::types::Shape;
use std::rc::Rc;

/// Repeats size-1 dimensions of the input up to `shape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastTo {
    pub shape: Shape,
}

impl ElementaryFn for BroadcastTo {
    fn name(&self) -> &str {
        "BroadcastTo"
    }

    fn output_shape(&self, input: Shape) -> Result<Shape, GradError> {
        if broadcast_shapes(input, self.shape)? != self.shape {
            return Err(GradError::BroadcastError {
                shape1: input,
                shape2: self.shape,
            });
        }
        Ok(self.shape)
    }

    fn forward(&self, input: &Tensor) -> Result<Tensor, GradError> {
        input.broadcast_to(self.shape)
    }

    /// Sums the gradient back over the repeated dimensions.
    fn backward(&self, grad: &Tensor, _output: &Tensor, input: &Tensor) -> Result<Tensor, GradError> {
        grad.reduce_to_shape(input.shape())
    }

    fn derivative(&self, input: &Graph, by: &Graph) -> Result<Graph, GradError> {
        input.gradient_graph(by)?.broadcast_to(self.shape)
    }
}

impl Graph {
    /// Broadcasts this expression to `shape`.
    ///
    /// Returns the handle itself when the shape already matches.
    pub fn broadcast_to(&self, shape: Shape) -> Result<Graph, GradError> {
        if self.shape() == shape {
            return Ok(self.clone());
        }
        Graph::lambda(self, Rc::new(BroadcastTo { shape }))
    }
}
