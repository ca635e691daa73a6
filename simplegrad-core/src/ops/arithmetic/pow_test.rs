// simplegrad-core/src/ops/arithmetic/pow_test.rs

#[cfg(test)]
mod tests {
    use crate::error::GradError;
    use crate::graph::Graph;
    use crate::ops::arithmetic::pow_op;
    use crate::tensor::Tensor;
    use crate::types::Shape;
    use crate::utils::testing::{check_tensor_near, create_test_value, create_test_variable};
    use approx::assert_relative_eq;

    #[test]
    fn test_pow_forward() -> Result<(), GradError> {
        let base = create_test_value(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        let y = pow_op(&base, &Graph::constant(2.0))?;
        assert_eq!(y.name(), "Pow");
        check_tensor_near(&y.forward()?, Shape::new(2, 2), &[1.0, 4.0, 9.0, 16.0], 1e-12);

        let y = base.pow(0.5)?;
        check_tensor_near(&y.forward()?, Shape::new(2, 2), &[1.0, 2f64.sqrt(), 3f64.sqrt(), 2.0], 1e-12);
        Ok(())
    }

    #[test]
    fn test_pow_zero_base_negative_exponent() -> Result<(), GradError> {
        let base = create_test_value(vec![0.0, 1.0], vec![1, 2]);
        let err = base.pow(-2.0)?.forward().unwrap_err();
        assert_eq!(err, GradError::DivisionByZero);

        // A zero base with a non-negative exponent is fine.
        let y = base.pow(0.0)?.forward()?;
        check_tensor_near(&y, Shape::new(1, 2), &[1.0, 1.0], 0.0);
        Ok(())
    }

    #[test]
    fn test_pow_backward_base_only() -> Result<(), GradError> {
        let x = create_test_variable(vec![1.0, 2.0, 3.0], vec![1, 3]);
        x.pow(3.0)?.calc_grad()?;
        check_tensor_near(&x.grad().unwrap(), Shape::new(1, 3), &[3.0, 12.0, 27.0], 1e-12);
        Ok(())
    }

    #[test]
    fn test_pow_constant_exponent_over_negative_base() -> Result<(), GradError> {
        // ln(base) is never evaluated for a constant exponent.
        let x = Graph::variable(Tensor::scalar(-2.0));
        x.pow(2.0)?.calc_grad()?;
        assert_eq!(x.grad().unwrap(), Tensor::scalar(-4.0));
        Ok(())
    }

    #[test]
    fn test_pow_backward_both_operands() -> Result<(), GradError> {
        let b = Graph::variable(Tensor::scalar(2.0));
        let e = Graph::variable(Tensor::scalar(3.0));
        pow_op(&b, &e)?.calc_grad()?;
        assert_relative_eq!(b.grad().unwrap().to_scalar()?, 12.0, epsilon = 1e-12);
        assert_relative_eq!(e.grad().unwrap().to_scalar()?, 8.0 * 2f64.ln(), epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_pow_derivative_variable_exponent() -> Result<(), GradError> {
        // d/dx x^x = x^x (ln x + 1)
        let x = Graph::variable(Tensor::scalar(2.0));
        let y = pow_op(&x, &x)?;
        let dy = y.gradient_graph(&x)?;
        assert_relative_eq!(dy.forward()?.to_scalar()?, 4.0 * (2f64.ln() + 1.0), epsilon = 1e-12);

        y.calc_grad()?;
        assert_relative_eq!(x.grad().unwrap().to_scalar()?, dy.forward()?.to_scalar()?, epsilon = 1e-12);
        Ok(())
    }
}
