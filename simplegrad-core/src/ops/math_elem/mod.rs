//! Elementwise transcendental functions.

pub mod abs;
pub mod exp;
pub mod ln;

pub use abs::Abs;
pub use exp::{Exp, ExpSubMax};
pub use ln::Ln;

#[cfg(test)]
mod abs_test;
