#[cfg(test)]
mod tests {
    use crate::error::GradError;
    use crate::graph::Graph;
    use crate::tensor::Tensor;
    use crate::types::Shape;

    fn matrix() -> Tensor {
        Tensor::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
    }

    #[test]
    fn test_sum_all() -> Result<(), GradError> {
        let y = Graph::value(matrix()).sum_all()?;
        assert_eq!(y.shape(), Shape::SCALAR);
        assert_eq!(y.forward()?.to_scalar()?, 21.0);
        Ok(())
    }

    #[test]
    fn test_sum_axes() -> Result<(), GradError> {
        let x = Graph::value(matrix());
        assert_eq!(x.sum(Some(0))?.forward()?, Tensor::from([[5.0, 7.0, 9.0]]));
        assert_eq!(x.sum(Some(1))?.forward()?, Tensor::from([[6.0], [15.0]]));
        Ok(())
    }

    #[test]
    fn test_sum_invalid_axis() {
        let x = Graph::value(matrix());
        assert_eq!(x.sum(Some(2)).unwrap_err(), GradError::InvalidAxis { axis: 2 });
    }

    #[test]
    fn test_sum_backward_spreads_gradient() -> Result<(), GradError> {
        let x = Graph::variable(matrix());
        let weights = Graph::value(Tensor::from([[1.0], [10.0]]));
        let y = crate::ops::mul_op(&x.sum(Some(1))?, &weights)?;
        y.calc_grad()?;
        assert_eq!(
            x.grad().unwrap(),
            Tensor::from([[1.0, 1.0, 1.0], [10.0, 10.0, 10.0]])
        );
        Ok(())
    }

    #[test]
    fn test_sum_derivative() -> Result<(), GradError> {
        let w = Graph::variable(Tensor::scalar(2.0));
        let x = Graph::value(matrix());
        let y = crate::ops::mul_op(&x, &w)?.sum(Some(0))?;
        let dy = y.gradient_graph(&w)?;
        assert_eq!(dy.shape(), Shape::new(1, 3));
        assert_eq!(dy.forward()?, Tensor::from([[5.0, 7.0, 9.0]]));
        Ok(())
    }
}
