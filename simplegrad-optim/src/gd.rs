use crate::{apply_update, check_lr, compute_gradients, validate_binding, Optimizer};
use simplegrad_core::{GradError, Graph};

/// Hyper-parameters of [`Gd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GdConfig {
    pub lr: f64,
}

impl Default for GdConfig {
    fn default() -> Self {
        GdConfig { lr: 1e-2 }
    }
}

impl GdConfig {
    pub fn validate(&self) -> Result<(), GradError> {
        check_lr(self.lr)
    }
}

/// Plain gradient descent: `value -= lr * grad`.
#[derive(Debug)]
pub struct Gd {
    objective: Graph,
    variables: Vec<Graph>,
    lr: f64,
}

impl Gd {
    pub fn new(objective: Graph, variables: Vec<Graph>, config: GdConfig) -> Result<Self, GradError> {
        config.validate()?;
        validate_binding(&objective, &variables)?;
        log::debug!(
            "GD bound to objective {} with {} variables (lr={})",
            objective.id(),
            variables.len(),
            config.lr
        );
        Ok(Gd {
            objective,
            variables,
            lr: config.lr,
        })
    }
}

impl Optimizer for Gd {
    fn step(&mut self) -> Result<(), GradError> {
        let grads = compute_gradients(&self.objective, &self.variables)?;
        for (var, grad) in self.variables.iter().zip(&grads) {
            apply_update(var, &grad.scale(self.lr))?;
        }
        log::debug!("GD step on objective {}", self.objective.id());
        Ok(())
    }

    fn objective(&self) -> &Graph {
        &self.objective
    }

    fn variables(&self) -> &[Graph] {
        &self.variables
    }

    fn lr(&self) -> f64 {
        self.lr
    }

    fn set_lr(&mut self, lr: f64) -> Result<(), GradError> {
        check_lr(lr)?;
        self.lr = lr;
        Ok(())
    }
}
