//! Finite-difference verification of analytic gradients.

use crate::error::GradError;
use crate::graph::{BackwardOptions, Graph};
use crate::tensor::Tensor;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for variable {variable_index}, element {element_index}: analytical {analytical_grad:?} != numerical {numerical_grad:?} (difference {difference:?})")]
    GradientMismatch {
        variable_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for variable {variable_index}, element {element_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        variable_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for variable {variable_index}, element {element_index}: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        variable_index: usize,
        element_index: usize,
        value: f64,
    },

    #[error("Graph evaluation failed during gradient check: {0}")]
    Graph(#[from] GradError),
}

/// Compares the gradient `backward()` leaves on each of `variables` with
/// central finite differences of `sum(output)`.
///
/// Each Variable element is nudged by `±epsilon` through `set_value`; the
/// original payloads are restored before returning, also on failure. An
/// element passes when the absolute difference or the difference relative
/// to the analytic value is within `tolerance`. Variables unreachable from
/// `output` are expected to have a zero gradient.
pub fn check_grad(
    output: &Graph,
    variables: &[Graph],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    output.reset_gradients();
    output.forward()?;
    output.backward_with(BackwardOptions {
        ignore_warnings: true,
    })?;

    let mut analytical = Vec::with_capacity(variables.len());
    for variable in variables {
        if !variable.is_variable() {
            return Err(GradError::NotAVariable {
                operation: "check_grad".to_string(),
            }
            .into());
        }
        let grad = if output.depends_on(variable) {
            variable
                .grad()
                .ok_or(GradError::MissingGradient { node: variable.id() })?
        } else {
            Tensor::filled(variable.shape(), 0.0)
        };
        analytical.push(grad);
    }

    for (variable_index, (variable, grad)) in variables.iter().zip(&analytical).enumerate() {
        let original = variable.payload().ok_or(GradError::NotAVariable {
            operation: "check_grad".to_string(),
        })?;
        let outcome = compare_variable(output, variable, variable_index, &original, grad, epsilon, tolerance);
        variable.set_value(original)?;
        outcome?;
    }
    Ok(())
}

fn compare_variable(
    output: &Graph,
    variable: &Graph,
    variable_index: usize,
    original: &Tensor,
    grad: &Tensor,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    for element_index in 0..original.numel() {
        let loss_plus = perturbed_loss(output, variable, original, element_index, epsilon)?;
        let loss_minus = perturbed_loss(output, variable, original, element_index, -epsilon)?;
        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        let analytical_grad = grad.data()[element_index];

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                variable_index,
                element_index,
                loss_plus,
                loss_minus,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                variable_index,
                element_index,
                value: analytical_grad,
            });
        }

        let difference = (analytical_grad - numerical_grad).abs();
        if difference > tolerance && difference / (analytical_grad.abs() + epsilon) > tolerance {
            return Err(GradCheckError::GradientMismatch {
                variable_index,
                element_index,
                analytical_grad,
                numerical_grad,
                difference,
            });
        }
    }
    Ok(())
}

fn perturbed_loss(
    output: &Graph,
    variable: &Graph,
    original: &Tensor,
    element_index: usize,
    delta: f64,
) -> Result<f64, GradError> {
    let mut perturbed = original.clone();
    perturbed.data_mut()[element_index] += delta;
    variable.set_value(perturbed)?;
    output.forward()?.sum(None)?.to_scalar()
}
