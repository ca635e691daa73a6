use crate::graph::Graph;
use crate::tensor::Tensor;
use crate::types::Shape;

/// Checks if two tensors are approximately equal (shape and data within tolerance).
/// Panics if shapes differ or data differs significantly.
pub fn check_tensor_near(actual: &Tensor, expected_shape: Shape, expected_data: &[f64], tolerance: f64) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.numel(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual.data().iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance || diff.is_nan() {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Variable leaf built from row-major data, for tests.
pub fn create_test_variable(data: Vec<f64>, shape: Vec<usize>) -> Graph {
    let tensor = Tensor::new(data, shape)
        .unwrap_or_else(|e| panic!("invalid test tensor: {}", e));
    Graph::variable(tensor)
}

/// Value leaf built from row-major data, for tests.
pub fn create_test_value(data: Vec<f64>, shape: Vec<usize>) -> Graph {
    let tensor = Tensor::new(data, shape)
        .unwrap_or_else(|e| panic!("invalid test tensor: {}", e));
    Graph::value(tensor)
}
