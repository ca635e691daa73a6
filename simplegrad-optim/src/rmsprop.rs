use crate::{apply_update, check_decay, check_eps, check_lr, compute_gradients, validate_binding, Optimizer};
use simplegrad_core::{GradError, Graph, Tensor};

/// Hyper-parameters of [`RmsProp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsPropConfig {
    pub lr: f64,
    pub betta: f64,
    pub eps: f64,
}

impl Default for RmsPropConfig {
    fn default() -> Self {
        RmsPropConfig {
            lr: 1e-2,
            betta: 0.9,
            eps: 1e-8,
        }
    }
}

impl RmsPropConfig {
    pub fn validate(&self) -> Result<(), GradError> {
        check_lr(self.lr)?;
        check_decay("betta", self.betta)?;
        check_eps(self.eps)
    }
}

/// Gradient scaled by a running root-mean-square of past gradients.
///
/// The squared-gradient average starts from the first squared gradient and
/// is blended before use: `value -= lr * grad / (eps + sqrt(average))`.
#[derive(Debug)]
pub struct RmsProp {
    objective: Graph,
    variables: Vec<Graph>,
    config: RmsPropConfig,
    square_avgs: Vec<Option<Tensor>>,
}

impl RmsProp {
    pub fn new(objective: Graph, variables: Vec<Graph>, config: RmsPropConfig) -> Result<Self, GradError> {
        config.validate()?;
        validate_binding(&objective, &variables)?;
        log::debug!(
            "RMSProp bound to objective {} with {} variables ({:?})",
            objective.id(),
            variables.len(),
            config
        );
        let square_avgs = vec![None; variables.len()];
        Ok(RmsProp {
            objective,
            variables,
            config,
            square_avgs,
        })
    }
}

impl Optimizer for RmsProp {
    fn step(&mut self) -> Result<(), GradError> {
        let grads = compute_gradients(&self.objective, &self.variables)?;
        let RmsPropConfig { lr, betta, eps } = self.config;
        for ((var, grad), slot) in self.variables.iter().zip(&grads).zip(self.square_avgs.iter_mut()) {
            let squared = grad.map(|g| g * g);
            let previous = slot.as_ref().unwrap_or(&squared);
            let average = previous.zip_map(&squared, "rmsprop", |s, g2| betta * s + (1.0 - betta) * g2)?;
            let update = grad.zip_map(&average, "rmsprop", |g, s| lr * g / (eps + s.sqrt()))?;
            apply_update(var, &update)?;
            *slot = Some(average);
        }
        log::debug!("RMSProp step on objective {}", self.objective.id());
        Ok(())
    }

    fn objective(&self) -> &Graph {
        &self.objective
    }

    fn variables(&self) -> &[Graph] {
        &self.variables
    }

    fn lr(&self) -> f64 {
        self.config.lr
    }

    fn set_lr(&mut self, lr: f64) -> Result<(), GradError> {
        check_lr(lr)?;
        self.config.lr = lr;
        Ok(())
    }
}
