//! Linear algebra operations on graphs.

pub mod matmul;

pub use matmul::matmul_op;
