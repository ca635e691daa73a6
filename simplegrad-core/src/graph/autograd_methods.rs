use crate::autograd::graph::{rebuild_schedule, schedule_for, Schedule};
use crate::error::GradError;
use crate::graph::{Graph, NodeKind};
use crate::ops::arithmetic::{add, mul, pow};
use crate::ops::comparison;
use crate::ops::linalg::matmul;
use crate::tensor::Tensor;
use std::collections::HashSet;

/// Options for [`Graph::backward_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BackwardOptions {
    /// Silences the warning emitted when the root already holds a gradient.
    pub ignore_warnings: bool,
}

impl Graph {
    /// Evaluates the expression bottom-up and caches the result on every node.
    ///
    /// Nodes that do not require grad return their cached value when one
    /// exists; grad-bearing nodes always recompute because an upstream
    /// Variable may have changed since the last call.
    pub fn forward(&self) -> Result<Tensor, GradError> {
        if !self.requires_grad() {
            if let Some(cached) = self.state().forward.clone() {
                return Ok(cached);
            }
        }
        let output = match &self.node.kind {
            NodeKind::Value(payload) => payload.clone(),
            NodeKind::Variable(payload) => payload.borrow().clone(),
            NodeKind::Add(a, b) => add::forward(&a.forward()?, &b.forward()?)?,
            NodeKind::Mul(a, b) => mul::forward(&a.forward()?, &b.forward()?)?,
            NodeKind::Pow(a, b) => pow::forward(&a.forward()?, &b.forward()?)?,
            NodeKind::MatMul(a, b) => a.forward()?.matmul(&b.forward()?)?,
            NodeKind::Compare(a, b, op) => comparison::forward(&a.forward()?, &b.forward()?, *op)?,
            NodeKind::Lambda(input, f) => f.forward(&input.forward()?)?,
        };
        if output.shape() != self.shape() {
            return Err(GradError::ShapeMismatch {
                expected: self.shape(),
                actual: output.shape(),
                operation: format!("forward of {}", self.name()),
            });
        }
        self.state_mut().forward = Some(output.clone());
        Ok(output)
    }

    /// Cached forward result, required by the local backward rules.
    pub(crate) fn forward_value(&self) -> Result<Tensor, GradError> {
        self.state()
            .forward
            .clone()
            .ok_or(GradError::ForwardNotComputed { node: self.id() })
    }

    /// Invalidates the gradient accumulator of every node below this one.
    pub fn reset_gradients(&self) {
        let mut visited = HashSet::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            if !visited.insert(node.id()) {
                continue;
            }
            node.state_mut().grad = None;
            stack.extend(node.children());
        }
    }

    /// Back-propagates from this node, seeding its gradient with ones.
    ///
    /// On a non-scalar root this computes the gradient of the sum of its
    /// entries. `forward()` must have been called first.
    pub fn backward(&self) -> Result<(), GradError> {
        self.backward_with(BackwardOptions::default())
    }

    pub fn backward_with(&self, options: BackwardOptions) -> Result<(), GradError> {
        self.forward_value()?;
        let mut schedule = schedule_for(self);
        if !schedule.is_current_for(self) {
            log::warn!(
                "Cached schedule of root {} (built for root {}, generation {}) no longer matches the traversal marks; rebuilding",
                self.id(),
                schedule.mark.root,
                schedule.mark.generation
            );
            self.reset_gradients();
            schedule = rebuild_schedule(self);
        }
        if self.state().grad.is_some() && !options.ignore_warnings {
            log::warn!(
                "Running backward on node {} without zeroing gradients",
                self.id()
            );
        }
        self.seed_gradient();

        match self.run_schedule(&schedule) {
            Err(GradError::MissingGradient { node }) => {
                log::warn!(
                    "Cached schedule of root {} (generation {}) is stale at node {}; rebuilding",
                    self.id(),
                    schedule.mark.generation,
                    node
                );
                self.reset_gradients();
                let schedule = rebuild_schedule(self);
                self.seed_gradient();
                self.run_schedule(&schedule)
            }
            other => other,
        }
    }

    /// `forward()` followed by `backward()`.
    pub fn calc_grad(&self) -> Result<(), GradError> {
        self.forward()?;
        self.backward()
    }

    fn seed_gradient(&self) {
        self.state_mut().grad = Some(Tensor::filled(self.shape(), 1.0));
    }

    fn run_schedule(&self, schedule: &Schedule) -> Result<(), GradError> {
        if schedule.includes_root {
            self.local_backward()?;
        }
        for node in schedule.order.iter().rev() {
            node.local_backward()?;
        }
        Ok(())
    }

    /// Adds `contribution` into this node's accumulator.
    ///
    /// The accumulator must already exist: parents pre-zero their children
    /// before distributing gradient.
    pub(crate) fn accumulate_grad(&self, contribution: &Tensor) -> Result<(), GradError> {
        let mut state = self.state_mut();
        let grad = state
            .grad
            .as_mut()
            .ok_or(GradError::MissingGradient { node: self.node.id })?;
        grad.add_assign(contribution)
    }

    /// Applies this node's local calculus rule, adding into its children.
    fn local_backward(&self) -> Result<(), GradError> {
        let grad = self
            .grad()
            .ok_or(GradError::MissingGradient { node: self.id() })?;
        log::trace!("backward visit {} ({})", self.id(), self.name());

        for child in self.operands() {
            let mut state = child.state_mut();
            if state.grad.is_none() {
                state.grad = Some(Tensor::filled(child.shape(), 0.0));
            }
        }
        if !self.requires_grad() {
            return Ok(());
        }

        match &self.node.kind {
            NodeKind::Value(_) | NodeKind::Variable(_) | NodeKind::Compare(..) => Ok(()),
            NodeKind::Add(a, b) => add::backward(&grad, a, b),
            NodeKind::Mul(a, b) => mul::backward(&grad, a, b),
            NodeKind::Pow(a, b) => pow::backward(&grad, a, b),
            NodeKind::MatMul(a, b) => matmul::backward(&grad, a, b),
            NodeKind::Lambda(input, f) => {
                let input_grad = f.backward(&grad, &self.forward_value()?, &input.forward_value()?)?;
                input.accumulate_grad(&input_grad)
            }
        }
    }
}
