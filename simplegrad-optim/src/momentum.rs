use crate::{apply_update, check_decay, check_lr, compute_gradients, validate_binding, Optimizer};
use simplegrad_core::{GradError, Graph, Tensor};

/// Hyper-parameters of [`Momentum`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumConfig {
    pub lr: f64,
    /// Weight of the running average when blending in a new gradient.
    pub betta: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        MomentumConfig { lr: 1e-2, betta: 0.9 }
    }
}

impl MomentumConfig {
    pub fn validate(&self) -> Result<(), GradError> {
        check_lr(self.lr)?;
        check_decay("betta", self.betta)
    }
}

/// Gradient descent along an exponentially weighted average of gradients.
///
/// The average starts from the first observed gradient. Each step blends
/// `betta * average + (1 - betta) * grad` and then moves by `lr * average`.
#[derive(Debug)]
pub struct Momentum {
    objective: Graph,
    variables: Vec<Graph>,
    lr: f64,
    betta: f64,
    averages: Vec<Option<Tensor>>,
}

impl Momentum {
    pub fn new(objective: Graph, variables: Vec<Graph>, config: MomentumConfig) -> Result<Self, GradError> {
        config.validate()?;
        validate_binding(&objective, &variables)?;
        log::debug!(
            "Momentum bound to objective {} with {} variables (lr={}, betta={})",
            objective.id(),
            variables.len(),
            config.lr,
            config.betta
        );
        let averages = vec![None; variables.len()];
        Ok(Momentum {
            objective,
            variables,
            lr: config.lr,
            betta: config.betta,
            averages,
        })
    }
}

impl Optimizer for Momentum {
    fn step(&mut self) -> Result<(), GradError> {
        let grads = compute_gradients(&self.objective, &self.variables)?;
        let betta = self.betta;
        for ((var, grad), slot) in self.variables.iter().zip(&grads).zip(self.averages.iter_mut()) {
            let previous = slot.as_ref().unwrap_or(grad);
            let average = previous.zip_map(grad, "momentum", |s, g| betta * s + (1.0 - betta) * g)?;
            apply_update(var, &average.scale(self.lr))?;
            *slot = Some(average);
        }
        log::debug!("Momentum step on objective {}", self.objective.id());
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
