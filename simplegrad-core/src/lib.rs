//! # simplegrad-core
//!
//! Reverse-mode automatic differentiation over 2-D tensor expression graphs,
//! with symbolic construction of derivative graphs.
//!
//! Expressions are built from [`Graph`] handles: leaves are constant values
//! or trainable variables, inner nodes are arithmetic, matrix-product,
//! comparison, or generic elementary-function nodes. A root can be
//! evaluated ([`Graph::forward`]), differentiated numerically
//! ([`Graph::backward`]) or differentiated symbolically
//! ([`Graph::gradient_graph`]), which yields a new graph that can itself be
//! evaluated and differentiated again.
//!
//! ```
//! use simplegrad_core::{Graph, Tensor};
//!
//! let u = Graph::variable(Tensor::scalar(2.0));
//! let v = Graph::variable(Tensor::scalar(3.0));
//! let f = 1.0 + 5.0 * (&u * &v) + 6.0;
//! f.calc_grad().unwrap();
//! assert_eq!(u.grad().unwrap().to_scalar().unwrap(), 15.0);
//! assert_eq!(v.grad().unwrap().to_scalar().unwrap(), 10.0);
//! ```

pub mod autograd;
pub mod error;
pub mod graph;
pub mod ops;
pub mod tensor;
pub mod types;
pub mod utils;

pub use autograd::{check_grad, GradCheckError};
pub use error::{ErrorKind, GradError};
pub use graph::{BackwardOptions, Graph};
pub use ops::{
    add_op, compare_op, div_op, matmul_op, mul_op, neg_op, pow_op, sub_op, CmpOp, ElementaryFn,
};
pub use tensor::Tensor;
pub use types::{NodeId, Shape};

// Re-export traits required by public functions/structs
pub use num_traits;
