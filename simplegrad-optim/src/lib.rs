//! Optimizers for simplegrad expression graphs.
//!
//! Every optimizer binds to a scalar objective graph and the Variables it
//! may update. One [`Optimizer::step`] resets the objective's gradients,
//! re-evaluates it with a backward pass, then writes new Variable payloads.

use simplegrad_core::{GradError, Graph, Tensor};

pub mod adam;
pub mod gd;
pub mod momentum;
pub mod newton;
pub mod rmsprop;

#[cfg(test)]
mod gd_test;
#[cfg(test)]
mod momentum_test;

pub use adam::{Adam, AdamConfig};
pub use gd::{Gd, GdConfig};
pub use momentum::{Momentum, MomentumConfig};
pub use newton::Newton;
pub use rmsprop::{RmsProp, RmsPropConfig};

/// Trait defining the common interface for all optimizers.
pub trait Optimizer {
    /// Performs a single optimization step.
    ///
    /// Numeric failures (singular Hessian, division by zero) are returned
    /// as-is; nothing is retried.
    fn step(&mut self) -> Result<(), GradError>;

    /// The scalar graph being minimised.
    fn objective(&self) -> &Graph;

    /// The Variables updated by `step`, in binding order.
    fn variables(&self) -> &[Graph];

    fn lr(&self) -> f64;

    /// Changes the learning rate between steps. The rate is validated like
    /// the one given at construction.
    fn set_lr(&mut self, lr: f64) -> Result<(), GradError>;
}

/// Checks the objective is `(1, 1)` and every bound entry is a Variable.
pub(crate) fn validate_binding(objective: &Graph, variables: &[Graph]) -> Result<(), GradError> {
    if !objective.shape().is_scalar() {
        return Err(GradError::NonScalar {
            shape: objective.shape(),
        });
    }
    if variables.is_empty() {
        return Err(GradError::NoVariables);
    }
    if variables.iter().any(|v| !v.is_variable()) {
        return Err(GradError::NotAVariable {
            operation: "optimizer binding".to_string(),
        });
    }
    Ok(())
}

/// Resets and re-evaluates `objective`, returning the gradient of each
/// Variable. Variables the objective does not reach get a zero gradient.
pub(crate) fn compute_gradients(objective: &Graph, variables: &[Graph]) -> Result<Vec<Tensor>, GradError> {
    objective.reset_gradients();
    objective.calc_grad()?;
    variables
        .iter()
        .map(|var| {
            if objective.depends_on(var) {
                var.grad().ok_or(GradError::MissingGradient { node: var.id() })
            } else {
                Tensor::zeros(var.shape())
            }
        })
        .collect()
}

/// `value -= update`, elementwise.
pub(crate) fn apply_update(variable: &Graph, update: &Tensor) -> Result<(), GradError> {
    variable.update_value(|value| {
        *value = value.zip_map(update, "optimizer update", |v, u| v - u)?;
        Ok(())
    })
}

pub(crate) fn check_lr(lr: f64) -> Result<(), GradError> {
    if !(lr > 0.0 && lr.is_finite()) {
        return Err(GradError::ConfigurationError(format!(
            "Learning rate must be positive, got {}",
            lr
        )));
    }
    Ok(())
}

pub(crate) fn check_decay(name: &str, value: f64) -> Result<(), GradError> {
    if !(0.0..1.0).contains(&value) {
        return Err(GradError::ConfigurationError(format!(
            "{} must be in [0.0, 1.0), got {}",
            name, value
        )));
    }
    Ok(())
}

pub(crate) fn check_eps(eps: f64) -> Result<(), GradError> {
    if !(eps > 0.0) {
        return Err(GradError::ConfigurationError(format!(
            "Epsilon must be positive, got {}",
            eps
        )));
    }
    Ok(())
}
