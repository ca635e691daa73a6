//! The generic node and its strategy interface.
//!
//! A generic node wraps one input sub-expression and an [`ElementaryFn`]
//! describing how to evaluate it, how to push gradient back into the input,
//! and (optionally) how to build its symbolic derivative. The built-in
//! structural and transcendental functions are implemented this way, and
//! callers can register their own.

use crate::error::GradError;
use crate::graph::{Graph, NodeKind};
use crate::tensor::Tensor;
use crate::types::Shape;
use std::fmt::Debug;
use std::rc::Rc;

/// Strategy object for a unary function wrapped by a generic node.
pub trait ElementaryFn: Debug {
    /// Label used in diagnostics and error messages.
    fn name(&self) -> &str;

    /// Shape produced for an input of shape `input`.
    fn output_shape(&self, input: Shape) -> Result<Shape, GradError> {
        Ok(input)
    }

    fn forward(&self, input: &Tensor) -> Result<Tensor, GradError>;

    /// Gradient to add into the input, given the upstream gradient, this
    /// node's forward value and the input's forward value.
    fn backward(&self, grad: &Tensor, output: &Tensor, input: &Tensor) -> Result<Tensor, GradError>;

    /// Graph of d(f(input))/d(by). Must be provided by any function that
    /// takes part in symbolic differentiation.
    fn derivative(&self, input: &Graph, by: &Graph) -> Result<Graph, GradError> {
        let _ = (input, by);
        Err(GradError::MissingDerivative {
            name: self.name().to_string(),
        })
    }
}

impl Graph {
    /// Wraps a copy of `input` in a generic node driven by `function`.
    pub fn lambda(input: &Graph, function: Rc<dyn ElementaryFn>) -> Result<Graph, GradError> {
        let shape = function.output_shape(input.shape())?;
        Ok(Graph::from_kind(
            shape,
            NodeKind::Lambda(input.graph_copy(), function),
        ))
    }
}

/// Delegates to the strategy and checks the derivative keeps the node shape.
pub(crate) fn derivative(
    node: &Graph,
    input: &Graph,
    function: &Rc<dyn ElementaryFn>,
    by: &Graph,
) -> Result<Graph, GradError> {
    let derived = function.derivative(input, by)?;
    if derived.shape() != node.shape() {
        return Err(GradError::ShapeMismatch {
            expected: node.shape(),
            actual: derived.shape(),
            operation: format!("derivative of {}", function.name()),
        });
    }
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// Squares its input; deliberately ships no symbolic derivative.
    #[derive(Debug)]
    struct Square;

    impl ElementaryFn for Square {
        fn name(&self) -> &str {
            "Square"
        }

        fn forward(&self, input: &Tensor) -> Result<Tensor, GradError> {
            Ok(input.map(|x| x * x))
        }

        fn backward(&self, grad: &Tensor, _output: &Tensor, input: &Tensor) -> Result<Tensor, GradError> {
            grad.zip_map(input, "square backward", |g, x| 2.0 * g * x)
        }
    }

    #[test]
    fn test_custom_function_forward_and_backward() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::from([[1.0, -2.0, 3.0]]));
        let y = Graph::lambda(&x, Rc::new(Square))?;
        assert_eq!(y.name(), "Square");
        assert_eq!(y.forward()?, Tensor::from([[1.0, 4.0, 9.0]]));

        y.backward()?;
        assert_eq!(x.grad().unwrap(), Tensor::from([[2.0, -4.0, 6.0]]));
        Ok(())
    }

    #[test]
    fn test_missing_derivative_surfaces_on_use() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::scalar(3.0));
        let y = Graph::lambda(&x, Rc::new(Square))?;
        let err = y.gradient_graph(&x).unwrap_err();
        assert_eq!(
            err,
            GradError::MissingDerivative {
                name: "Square".to_string()
            }
        );
        assert_eq!(err.kind(), ErrorKind::Precondition);

        // Not reachable from the target: short-circuits to zero without asking.
        let other = Graph::variable(Tensor::scalar(1.0));
        let zero = y.gradient_graph(&other)?;
        assert_eq!(zero.forward()?, Tensor::scalar(0.0));
        Ok(())
    }
}
