//! Scheduling, symbolic differentiation and gradient checking.

pub(crate) mod graph;
pub mod grad_check;
mod gradient_graph;

pub use grad_check::{check_grad, GradCheckError};
