// simplegrad-core/src/ops/view/transpose.rs

use crate::error::GradError;
use crate::graph::Graph;
use crate::ops::lambda::ElementaryFn;
use crate::tensor::Tensor;
use crate::types::Shape;
use std::rc::Rc;

/// Swaps rows and columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transpose;

impl ElementaryFn for Transpose {
    fn name(&self) -> &str {
        "Transpose"
    }

    fn output_shape(&self, input: Shape) -> Result<Shape, GradError> {
        Ok(input.transposed())
    }

    fn forward(&self, input: &Tensor) -> Result<Tensor, GradError> {
        Ok(input.transpose())
    }

    fn backward(&self, grad: &Tensor, _output: &Tensor, _input: &Tensor) -> Result<Tensor, GradError> {
        Ok(grad.transpose())
    }

    /// d(xᵀ) = (dx)ᵀ
    fn derivative(&self, input: &Graph, by: &Graph) -> Result<Graph, GradError> {
        input.gradient_graph(by)?.t()
    }
}

impl Graph {
    /// Transposed view of this expression.
    pub fn t(&self) -> Result<Graph, GradError> {
        Graph::lambda(self, Rc::new(Transpose))
    }
}
