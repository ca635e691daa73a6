use crate::{apply_update, compute_gradients, validate_binding, Optimizer};
use simplegrad_core::{GradError, Graph, Shape, Tensor};

/// Multivariate Newton's method over scalar Variables.
///
/// At bind time a symbolic derivative graph `d objective / d x_i` is built
/// for every Variable. Each step re-differentiates those graphs to fill the
/// Hessian row by row, then solves `H * delta = grad` and subtracts `delta`.
#[derive(Debug)]
pub struct Newton {
    objective: Graph,
    variables: Vec<Graph>,
    derivatives: Vec<Graph>,
}

impl Newton {
    pub fn new(objective: Graph, variables: Vec<Graph>) -> Result<Self, GradError> {
        validate_binding(&objective, &variables)?;
        if let Some(var) = variables.iter().find(|v| !v.shape().is_scalar()) {
            return Err(GradError::NonScalarVariable { shape: var.shape() });
        }
        let derivatives = variables
            .iter()
            .map(|var| objective.gradient_graph(var))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "Newton bound to objective {} with {} variables",
            objective.id(),
            variables.len()
        );
        Ok(Newton {
            objective,
            variables,
            derivatives,
        })
    }

    /// Symbolic first derivatives of the objective, one per Variable.
    pub fn derivatives(&self) -> &[Graph] {
        &self.derivatives
    }

    /// Evaluates the Hessian of the objective at the current payloads.
    ///
    /// Row `i` holds the gradient of `d objective / d x_i`; entries for
    /// Variables that derivative does not reach are zero.
    pub fn hessian(&self) -> Result<Tensor, GradError> {
        let n = self.variables.len();
        let mut entries = Vec::with_capacity(n * n);
        for derivative in &self.derivatives {
            derivative.reset_gradients();
            derivative.calc_grad()?;
            for var in &self.variables {
                let entry = if derivative.depends_on(var) {
                    var.grad()
                        .ok_or(GradError::MissingGradient { node: var.id() })?
                        .to_scalar()?
                } else {
                    0.0
                };
                entries.push(entry);
            }
        }
        Tensor::from_shape_vec(Shape::new(n, n), entries)
    }
}

impl Optimizer for Newton {
    fn step(&mut self) -> Result<(), GradError> {
        let grads = compute_gradients(&self.objective, &self.variables)?;
        let gradient = grads
            .iter()
            .map(Tensor::to_scalar)
            .collect::<Result<Vec<_>, _>>()?;
        let gradient = Tensor::from_shape_vec(Shape::new(self.variables.len(), 1), gradient)?;

        let hessian = self.hessian()?;
        let delta = hessian.solve(&gradient)?;
        for (var, &d) in self.variables.iter().zip(delta.data()) {
            apply_update(var, &Tensor::scalar(d))?;
        }
        log::debug!(
            "Newton step on objective {}: |delta|max = {}",
            self.objective.id(),
            delta.data().iter().fold(0.0f64, |m, d| m.max(d.abs()))
        );
        Ok(())
    }

    fn objective(&self) -> &Graph {
        &self.objective
    }

    fn variables(&self) -> &[Graph] {
        &self.variables
    }

    /// Newton steps are not scaled.
    fn lr(&self) -> f64 {
        1.0
    }

    /// Newton steps are always full; the request is logged and ignored.
    fn set_lr(&mut self, lr: f64) -> Result<(), GradError> {
        log::warn!("Newton's method has no learning rate; ignoring set_lr({})", lr);
        Ok(())
    }
}
