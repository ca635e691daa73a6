// src/ops/activation/mod.rs

//! # Activation Functions
//!
//! Nonlinearities composed from the primitive nodes. None of them adds a node
//! kind: gradients and symbolic derivatives come from the building blocks.
//! Piecewise functions select their branch through comparison masks, which
//! are gradient-opaque, so gradient only flows through the active branch.

use crate::error::GradError;
use crate::graph::Graph;
use crate::ops::arithmetic::{add_op, div_op, mul_op, neg_op, sub_op};

impl Graph {
    /// `max(0, x)`, built as `(x > 0) * x`.
    pub fn relu(&self) -> Result<Graph, GradError> {
        mul_op(&self.greater(0.0)?, self)
    }

    /// `x` for positive inputs, `alpha * (e^x - 1)` otherwise.
    pub fn elu(&self, alpha: f64) -> Result<Graph, GradError> {
        let positive = mul_op(&self.greater(0.0)?, self)?;
        let curve = mul_op(&sub_op(&self.exp()?, &Graph::constant(1.0))?, &Graph::constant(alpha))?;
        let negative = mul_op(&self.less_equal(0.0)?, &curve)?;
        add_op(&positive, &negative)
    }

    /// `1 / (1 + e^-x)`
    pub fn sigmoid(&self) -> Result<Graph, GradError> {
        let denominator = add_op(&Graph::constant(1.0), &neg_op(self)?.exp()?)?;
        div_op(&Graph::constant(1.0), &denominator)
    }

    /// `(e^x - e^-x) / (e^x + e^-x)`
    pub fn tanh(&self) -> Result<Graph, GradError> {
        let up = self.exp()?;
        let down = neg_op(self)?.exp()?;
        div_op(&sub_op(&up, &down)?, &add_op(&up, &down)?)
    }

    /// Normalised exponentials along `axis` (`None` normalises over every
    /// element). Uses the max-shifted exponential for stability.
    pub fn softmax(&self, axis: Option<usize>) -> Result<Graph, GradError> {
        let shifted = self.exp_sub_max(axis)?;
        div_op(&shifted, &shifted.sum(axis)?)
    }
}
