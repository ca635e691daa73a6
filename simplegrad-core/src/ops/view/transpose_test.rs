#[cfg(test)]
mod tests {
    use crate::error::GradError;
    use crate::graph::Graph;
    use crate::tensor::Tensor;
    use crate::types::Shape;

    #[test]
    fn test_transpose_forward() -> Result<(), GradError> {
        let x = Graph::value(Tensor::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]));
        let y = x.t()?;
        assert_eq!(y.shape(), Shape::new(3, 2));
        assert_eq!(y.name(), "Transpose");
        assert_eq!(
            y.forward()?,
            Tensor::from([[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]])
        );
        Ok(())
    }

    #[test]
    fn test_transpose_backward() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]));
        let weights = Graph::value(Tensor::from([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]));
        let y = crate::ops::mul_op(&x.t()?, &weights)?;
        y.calc_grad()?;
        // Each entry of x receives the weight sitting at its transposed slot.
        assert_eq!(
            x.grad().unwrap(),
            Tensor::from([[1.0, 3.0, 5.0], [2.0, 4.0, 6.0]])
        );
        Ok(())
    }

    #[test]
    fn test_transpose_derivative_keeps_shape() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::scalar(2.0));
        let row = Graph::value(Tensor::from([[1.0, 2.0, 3.0]]));
        let y = crate::ops::mul_op(&row, &x)?.t()?;
        let dy = y.gradient_graph(&x)?;
        assert_eq!(dy.shape(), Shape::new(3, 1));
        assert_eq!(dy.forward()?, Tensor::from([[1.0], [2.0], [3.0]]));
        Ok(())
    }
}
