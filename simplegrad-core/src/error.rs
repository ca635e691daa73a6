use crate::types::{NodeId, Shape};
use thiserror::Error;

/// Broad classification of a [`GradError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Incompatible operand shapes, detected while building a graph.
    Shape,
    /// The caller broke a usage contract (e.g. backward before forward).
    Precondition,
    /// A numeric failure such as a singular matrix.
    Numeric,
    /// Internal bookkeeping was found inconsistent.
    Internal,
}

/// Custom error type for the simplegrad engine.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum GradError {
    #[error("Cannot broadcast shapes: {shape1} and {shape2}")]
    BroadcastError { shape1: Shape, shape2: Shape },

    #[error("Incompatible shapes for operation {operation}: {shape1} and {shape2}")]
    IncompatibleShapes {
        shape1: Shape,
        shape2: Shape,
        operation: String,
    },

    #[error("Shape mismatch: expected {expected}, got {actual} during operation {operation}")]
    ShapeMismatch {
        expected: Shape,
        actual: Shape,
        operation: String,
    },

    #[error("Unsupported rank {rank} for operation {operation}: only ranks 0, 1 and 2 are accepted")]
    InvalidRank { rank: usize, operation: String },

    #[error("Invalid axis {axis}: tensors are 2-D")]
    InvalidAxis { axis: usize },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Forward propagation must be called before reading node {node}")]
    ForwardNotComputed { node: NodeId },

    #[error("Operation {operation} requires a Variable node")]
    NotAVariable { operation: String },

    #[error("Cannot convert tensor of shape {shape} to a scalar")]
    NonScalar { shape: Shape },

    #[error("Newton's method requires scalar (1, 1) variables, got {shape}")]
    NonScalarVariable { shape: Shape },

    #[error("No symbolic derivative defined for elementary function {name}")]
    MissingDerivative { name: String },

    #[error("No variables to optimize")]
    NoVariables,

    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    #[error("Division by zero error")]
    DivisionByZero,

    #[error("Singular matrix of size {size} cannot be inverted")]
    SingularMatrix { size: usize },

    #[error("Shape mismatch during gradient accumulation: expected {expected}, got {actual}")]
    GradientAccumulationShapeMismatch { expected: Shape, actual: Shape },

    #[error("Node {node} was scheduled for backward without a gradient accumulator")]
    MissingGradient { node: NodeId },
}

impl GradError {
    /// Returns the taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GradError::BroadcastError { .. }
            | GradError::IncompatibleShapes { .. }
            | GradError::ShapeMismatch { .. }
            | GradError::InvalidRank { .. }
            | GradError::InvalidAxis { .. }
            | GradError::TensorCreationError { .. } => ErrorKind::Shape,
            GradError::ForwardNotComputed { .. }
            | GradError::NotAVariable { .. }
            | GradError::NonScalar { .. }
            | GradError::NonScalarVariable { .. }
            | GradError::MissingDerivative { .. }
            | GradError::NoVariables
            | GradError::ConfigurationError(_) => ErrorKind::Precondition,
            GradError::DivisionByZero | GradError::SingularMatrix { .. } => ErrorKind::Numeric,
            GradError::GradientAccumulationShapeMismatch { .. }
            | GradError::MissingGradient { .. } => ErrorKind::Internal,
        }
    }
}
