use crate::{apply_update, check_decay, check_eps, check_lr, compute_gradients, validate_binding, Optimizer};
use simplegrad_core::{GradError, Graph, Tensor};

/// Hyper-parameters of [`Adam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub lr: f64,
    /// Decay of the first-moment average.
    pub betta1: f64,
    /// Decay of the second-moment average.
    pub betta2: f64,
    pub eps: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            lr: 1e-2,
            betta1: 0.9,
            betta2: 0.99,
            eps: 1e-8,
        }
    }
}

impl AdamConfig {
    pub fn validate(&self) -> Result<(), GradError> {
        check_lr(self.lr)?;
        check_decay("betta1", self.betta1)?;
        check_decay("betta2", self.betta2)?;
        check_eps(self.eps)
    }
}

#[derive(Debug, Clone)]
struct Moments {
    first: Tensor,
    second: Tensor,
}

/// Adam-style optimizer without bias correction.
///
/// Both moment averages start from the first gradient (and its square).
/// The update direction `m / (eps + sqrt(v))` uses the averages as they
/// stood before this step's gradient is blended in; the blended averages
/// are stored for the next step.
#[derive(Debug)]
pub struct Adam {
    objective: Graph,
    variables: Vec<Graph>,
    config: AdamConfig,
    moments: Vec<Option<Moments>>,
}

impl Adam {
    pub fn new(objective: Graph, variables: Vec<Graph>, config: AdamConfig) -> Result<Self, GradError> {
        config.validate()?;
        validate_binding(&objective, &variables)?;
        log::debug!(
            "Adam bound to objective {} with {} variables ({:?})",
            objective.id(),
            variables.len(),
            config
        );
        let moments = vec![None; variables.len()];
        Ok(Adam {
            objective,
            variables,
            config,
            moments,
        })
    }
}

impl Optimizer for Adam {
    fn step(&mut self) -> Result<(), GradError> {
        let grads = compute_gradients(&self.objective, &self.variables)?;
        let AdamConfig {
            lr,
            betta1,
            betta2,
            eps,
        } = self.config;
        for ((var, grad), slot) in self.variables.iter().zip(&grads).zip(self.moments.iter_mut()) {
            let squared = grad.map(|g| g * g);
            let (first, second) = match slot.as_ref() {
                Some(Moments { first, second }) => (first, second),
                None => (grad, &squared),
            };

            let direction = first.zip_map(second, "adam", |m, v| m / (eps + v.sqrt()))?;
            let blended = Moments {
                first: first.zip_map(grad, "adam", |m, g| betta1 * m + (1.0 - betta1) * g)?,
                second: second.zip_map(&squared, "adam", |v, g2| betta2 * v + (1.0 - betta2) * g2)?,
            };
            // State only advances once the variable has accepted the update.
            apply_update(var, &direction.scale(lr))?;
            *slot = Some(blended);
        }
        log::debug!("Adam step on objective {}", self.objective.id());
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
