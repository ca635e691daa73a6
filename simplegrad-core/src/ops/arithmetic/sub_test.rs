// simplegrad-core/src/ops/arithmetic/sub_test.rs

#[cfg(test)]
mod tests {
    use crate::error::GradError;
    use crate::graph::Graph;
    use crate::ops::arithmetic::{neg_op, sub_op};
    use crate::tensor::Tensor;
    use crate::types::Shape;
    use crate::utils::testing::{check_tensor_near, create_test_value, create_test_variable};

    #[test]
    fn test_sub_forward() -> Result<(), GradError> {
        let a = create_test_value(vec![5.0, 7.0, 9.0], vec![1, 3]);
        let b = create_test_value(vec![1.0, 2.0, 3.0], vec![1, 3]);
        let c = sub_op(&a, &b)?;
        check_tensor_near(&c.forward()?, Shape::new(1, 3), &[4.0, 5.0, 6.0], 0.0);
        Ok(())
    }

    #[test]
    fn test_sub_broadcast_scalar() -> Result<(), GradError> {
        let a = create_test_value(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        let c = sub_op(&a, &Graph::constant(1.5))?;
        check_tensor_near(&c.forward()?, Shape::new(2, 2), &[-0.5, 0.5, 1.5, 2.5], 0.0);
        Ok(())
    }

    #[test]
    fn test_neg_forward_and_backward() -> Result<(), GradError> {
        let a = create_test_variable(vec![1.0, -2.0], vec![2, 1]);
        let c = neg_op(&a)?;
        check_tensor_near(&c.forward()?, Shape::new(2, 1), &[-1.0, 2.0], 0.0);
        c.backward()?;
        check_tensor_near(&a.grad().unwrap(), Shape::new(2, 1), &[-1.0, -1.0], 0.0);
        Ok(())
    }

    #[test]
    fn test_sub_backward_with_broadcast() -> Result<(), GradError> {
        let a = create_test_variable(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let b = create_test_variable(vec![1.0, 1.0, 1.0], vec![1, 3]);
        sub_op(&a, &b)?.calc_grad()?;
        check_tensor_near(&a.grad().unwrap(), Shape::new(2, 3), &[1.0; 6], 0.0);
        check_tensor_near(&b.grad().unwrap(), Shape::new(1, 3), &[-2.0, -2.0, -2.0], 0.0);
        Ok(())
    }

    #[test]
    fn test_self_subtraction_cancels() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::scalar(7.0));
        let z = sub_op(&x, &x)?;
        assert_eq!(z.forward()?, Tensor::scalar(0.0));
        z.backward()?;
        assert_eq!(x.grad().unwrap(), Tensor::scalar(0.0));
        assert_eq!(z.gradient_graph(&x)?.forward()?, Tensor::scalar(0.0));
        Ok(())
    }
}
