//! Structural views: transpose and broadcast-to-shape.
//!
//! Both are elementary functions wrapped by the generic node, so they take
//! part in backward passes and symbolic differentiation like any other node.

pub mod expand;
pub mod transpose;

pub use expand::BroadcastTo;
pub use transpose::Transpose;

#[cfg(test)]
mod transpose_test;
