// simplegrad-core/src/ops/comparison/mod.rs

//! # Element-wise Comparison Operations
//!
//! Relational operators between graphs, producing 0/1 tensors with the
//! broadcast shape of the operands.
//!
//! Comparisons are gradient-opaque: their backward rule contributes nothing
//! and their symbolic derivative is the zero graph. They are the building
//! block for piecewise functions (ReLU, ELU, sign) where gradient must flow
//! through the selected branch but never through the condition.

use crate::error::GradError;
use crate::graph::{Graph, NodeKind};
use crate::ops::broadcast_operands;
use crate::tensor::Tensor;
use std::fmt;

/// Relational operator of a comparison node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpOp {
    pub fn apply(self, a: f64, b: f64) -> bool {
        match self {
            CmpOp::Lt => a < b,
            CmpOp::Le => a <= b,
            CmpOp::Gt => a > b,
            CmpOp::Ge => a >= b,
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Builds a comparison node `a <op> b`, broadcasting both operands.
pub fn compare_op(a: &Graph, b: &Graph, op: CmpOp) -> Result<Graph, GradError> {
    let (shape, left, right) = broadcast_operands(a, b)?;
    Ok(Graph::from_kind(shape, NodeKind::Compare(left, right, op)))
}

pub(crate) fn forward(a: &Tensor, b: &Tensor, op: CmpOp) -> Result<Tensor, GradError> {
    a.zip_map(b, "compare", |x, y| if op.apply(x, y) { 1.0 } else { 0.0 })
}

impl Graph {
    pub fn less(&self, other: impl Into<Graph>) -> Result<Graph, GradError> {
        compare_op(self, &other.into(), CmpOp::Lt)
    }

    pub fn less_equal(&self, other: impl Into<Graph>) -> Result<Graph, GradError> {
        compare_op(self, &other.into(), CmpOp::Le)
    }

    pub fn greater(&self, other: impl Into<Graph>) -> Result<Graph, GradError> {
        compare_op(self, &other.into(), CmpOp::Gt)
    }

    pub fn greater_equal(&self, other: impl Into<Graph>) -> Result<Graph, GradError> {
        compare_op(self, &other.into(), CmpOp::Ge)
    }

    pub fn equal(&self, other: impl Into<Graph>) -> Result<Graph, GradError> {
        compare_op(self, &other.into(), CmpOp::Eq)
    }

    pub fn not_equal(&self, other: impl Into<Graph>) -> Result<Graph, GradError> {
        compare_op(self, &other.into(), CmpOp::Ne)
    }
}

#[cfg(test)]
mod comparison_test;
