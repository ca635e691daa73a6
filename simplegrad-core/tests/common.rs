use simplegrad_core::{Graph, Tensor};

// Helpers shared by the integration test binaries. Not every binary uses
// every helper.
#[allow(dead_code)]
pub(crate) fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub(crate) fn scalar_variable(value: f64) -> Graph {
    Graph::variable(Tensor::scalar(value))
}

#[allow(dead_code)]
pub(crate) fn scalar_of(graph: &Graph) -> f64 {
    graph
        .forward()
        .and_then(|t| t.to_scalar())
        .expect("scalar evaluation failed")
}

#[allow(dead_code)]
pub(crate) fn grad_of(variable: &Graph) -> f64 {
    variable
        .grad()
        .expect("variable has no gradient")
        .to_scalar()
        .expect("gradient is not a scalar")
}
