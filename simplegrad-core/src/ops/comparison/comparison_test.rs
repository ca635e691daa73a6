// simplegrad-core/src/ops/comparison/comparison_test.rs

#[cfg(test)]
mod tests {
    use crate::error::{ErrorKind, GradError};
    use crate::graph::Graph;
    use crate::ops::comparison::{compare_op, CmpOp};
    use crate::tensor::Tensor;
    use crate::types::Shape;
    use crate::utils::testing::{check_tensor_near, create_test_variable};

    #[test]
    fn test_all_relations() -> Result<(), GradError> {
        let a = Graph::value(Tensor::from([[1.0, 2.0, 3.0]]));
        let b = Graph::value(Tensor::from([[2.0, 2.0, 2.0]]));
        let cases = [
            (CmpOp::Lt, [1.0, 0.0, 0.0]),
            (CmpOp::Le, [1.0, 1.0, 0.0]),
            (CmpOp::Gt, [0.0, 0.0, 1.0]),
            (CmpOp::Ge, [0.0, 1.0, 1.0]),
            (CmpOp::Eq, [0.0, 1.0, 0.0]),
            (CmpOp::Ne, [1.0, 0.0, 1.0]),
        ];
        for (op, expected) in cases {
            let c = compare_op(&a, &b, op)?;
            assert_eq!(c.name(), format!("Compare({})", op));
            check_tensor_near(&c.forward()?, Shape::new(1, 3), &expected, 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_method_forms_broadcast() -> Result<(), GradError> {
        let x = Graph::value(Tensor::from([[-1.0], [0.0], [4.0]]));
        let thresholds = Graph::value(Tensor::from([[0.0, 3.0]]));
        let c = x.greater_equal(&thresholds)?;
        assert_eq!(c.shape(), Shape::new(3, 2));
        check_tensor_near(&c.forward()?, Shape::new(3, 2), &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0], 0.0);

        let c = x.less(0.0)?;
        check_tensor_near(&c.forward()?, Shape::new(3, 1), &[1.0, 0.0, 0.0], 0.0);
        let c = x.not_equal(0)?;
        check_tensor_near(&c.forward()?, Shape::new(3, 1), &[1.0, 0.0, 1.0], 0.0);
        Ok(())
    }

    #[test]
    fn test_incompatible_shapes() {
        let a = Graph::value(Tensor::from([[1.0, 2.0, 3.0]]));
        let b = Graph::value(Tensor::from([[1.0, 2.0]]));
        let err = a.less_equal(&b).unwrap_err();
        assert!(matches!(err, GradError::BroadcastError { .. }));
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_backward_blocks_gradient() -> Result<(), GradError> {
        // y = x * (x > 0): only the multiplicand path carries gradient.
        let x = create_test_variable(vec![-2.0, 3.0], vec![1, 2]);
        let mask = x.greater(0.0)?;
        let y = &x * &mask;
        y.calc_grad()?;
        check_tensor_near(&x.grad().unwrap(), Shape::new(1, 2), &[0.0, 1.0], 0.0);
        Ok(())
    }

    #[test]
    fn test_comparison_alone_yields_zero_gradient() -> Result<(), GradError> {
        let x = Graph::variable(Tensor::scalar(5.0));
        let c = x.equal(5.0)?;
        assert!(c.requires_grad());
        c.calc_grad()?;
        assert_eq!(x.grad().unwrap(), Tensor::scalar(0.0));

        let dc = c.gradient_graph(&x)?;
        assert_eq!(dc.forward()?, Tensor::scalar(0.0));
        Ok(())
    }
}
