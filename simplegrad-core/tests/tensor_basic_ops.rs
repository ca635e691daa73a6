use simplegrad_core::{GradError, Shape, Tensor};

// Include the common helper module
mod common;
use common::create_test_tensor;

#[test]
fn test_tensor_equality() {
    let t1 = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let t2 = create_test_tensor(vec![1.0, 2.0], vec![2]);
    assert_eq!(t1, t2, "Tensors with same data and shape should be equal");

    let t3 = create_test_tensor(vec![1.0, 2.5], vec![2]);
    assert_ne!(t1, t3, "Tensors with different data should not be equal");

    let t4 = create_test_tensor(vec![1.0, 2.0], vec![1, 2]);
    assert_ne!(t1, t4, "Tensors with different shape should not be equal");
    assert_eq!(t1.shape(), Shape::new(2, 1), "Rank 1 becomes a column");
}

#[test]
fn test_rank_normalization() {
    assert_eq!(create_test_tensor(vec![4.0], vec![]).shape(), Shape::SCALAR);
    let err = Tensor::new(vec![1.0; 8], vec![2, 2, 2]).unwrap_err();
    assert!(matches!(err, GradError::InvalidRank { rank: 3, .. }));
    let err = Tensor::new(vec![1.0; 3], vec![2, 2]).unwrap_err();
    assert!(matches!(err, GradError::TensorCreationError { data_len: 3, .. }));
}

#[test]
fn test_broadcasting_arithmetic() -> Result<(), GradError> {
    let row = Tensor::from([[1.0, 2.0, 3.0]]);
    let col = Tensor::from([[10.0], [20.0]]);
    let sum = row.add(&col)?;
    assert_eq!(sum, Tensor::from([[11.0, 12.0, 13.0], [21.0, 22.0, 23.0]]));
    assert_eq!(sum.reduce_to_shape(Shape::new(1, 3))?, Tensor::from([[32.0, 34.0, 36.0]]));
    Ok(())
}

#[test]
fn test_solve_linear_system() -> Result<(), GradError> {
    let a = Tensor::from([[2.0, 1.0], [1.0, 3.0]]);
    let b = Tensor::from([[3.0], [5.0]]);
    let x = a.solve(&b)?;
    approx::assert_relative_eq!(x.data()[0], 0.8, epsilon = 1e-12);
    approx::assert_relative_eq!(x.data()[1], 1.4, epsilon = 1e-12);
    Ok(())
}
