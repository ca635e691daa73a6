#[cfg(test)]
mod tests {
    use crate::error::GradError;
    use crate::graph::Graph;
    use crate::tensor::Tensor;

    #[test]
    fn test_abs_forward_backward() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::from([[-2.0, 0.0, 3.0]]));
        let y = x.abs()?;
        assert_eq!(y.forward()?, Tensor::from([[2.0, 0.0, 3.0]]));
        y.backward()?;
        assert_eq!(x.grad().unwrap(), Tensor::from([[-1.0, 0.0, 1.0]]));
        Ok(())
    }

    #[test]
    fn test_sign_values() -> Result<(), GradError> {
        let x = Graph::value(Tensor::from([[-0.5, 0.0, 7.0]]));
        assert_eq!(x.sign()?.forward()?, Tensor::from([[-1.0, 0.0, 1.0]]));
        Ok(())
    }

    #[test]
    fn test_sign_carries_no_gradient() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::from([[-3.0, 2.0]]));
        x.sign()?.calc_grad()?;
        assert_eq!(x.grad().unwrap(), Tensor::from([[0.0, 0.0]]));
        Ok(())
    }

    #[test]
    fn test_abs_derivative() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::scalar(-3.0));
        let dy = x.abs()?.gradient_graph(&x)?;
        assert_eq!(dy.forward()?.to_scalar()?, -1.0);
        x.set_value(Tensor::scalar(2.0))?;
        assert_eq!(dy.forward()?.to_scalar()?, 1.0);
        Ok(())
    }
}
