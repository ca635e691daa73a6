//! # Graph Operations Module (`ops`)
//!
//! This module is the central hub for building expression graphs. Operations
//! are grouped into submodules by functionality.
//!
//! ## Structure:
//!
//! - **`_op` Functions:** Each binary operation has a public constructor
//!   (`add_op`, `mul_op`, `pow_op`, `matmul_op`, `compare_op`, ...) that
//!   validates shapes, copies its operands into the new node, and returns
//!   `Result<Graph, GradError>`.
//! - **Local rules:** Next to each constructor live the numeric `forward`,
//!   the local `backward` rule (always adding into child accumulators), and
//!   the symbolic `derivative` used by [`Graph::gradient_graph`].
//! - **Elementary functions:** Unary structural and transcendental functions
//!   (transpose, sum, broadcast, exp, ln, abs) are strategy objects
//!   implementing [`lambda::ElementaryFn`], wrapped by the generic node.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: Add, Sub, Mul, Div, Neg and Pow.
//! - [`linalg`]: Matrix product.
//! - [`comparison`]: Gradient-opaque relational operators.
//! - [`lambda`]: The generic node and the `ElementaryFn` strategy trait.
//! - [`math_elem`]: exp, ln, abs and sign.
//! - [`view`]: transpose and broadcast-to-shape.
//! - [`reduction`]: sum.
//! - [`activation`]: nonlinearities composed from the primitives above.

use crate::error::GradError;
use crate::graph::Graph;
use crate::tensor::broadcast_shapes;
use crate::types::Shape;

pub mod activation;
pub mod arithmetic;
pub mod comparison;
pub mod lambda;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod view;

pub use arithmetic::{add_op, div_op, mul_op, neg_op, pow_op, sub_op};
pub use comparison::{compare_op, CmpOp};
pub use lambda::ElementaryFn;
pub use linalg::matmul_op;

/// Copies both operands and broadcasts them to their common shape.
pub(crate) fn broadcast_operands(a: &Graph, b: &Graph) -> Result<(Shape, Graph, Graph), GradError> {
    let shape = broadcast_shapes(a.shape(), b.shape())?;
    Ok((shape, copy_to_shape(a, shape)?, copy_to_shape(b, shape)?))
}

fn copy_to_shape(operand: &Graph, shape: Shape) -> Result<Graph, GradError> {
    if operand.shape() == shape {
        Ok(operand.graph_copy())
    } else {
        // The broadcast node copies its input itself.
        operand.broadcast_to(shape)
    }
}
