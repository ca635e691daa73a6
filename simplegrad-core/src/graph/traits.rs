// src/graph/traits.rs

use crate::graph::Graph;
use crate::ops::arithmetic::{add_op, div_op, mul_op, neg_op, sub_op};
use std::fmt::{self, Debug};
use std::ops::{Add, Div, Mul, Neg, Sub};

impl Debug for Graph {
    /// Shows the node id, kind and shape; never walks the subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph({} {}, shape={}, requires_grad={})",
            self.id(),
            self.name(),
            self.shape(),
            self.requires_grad()
        )
    }
}

// Operator sugar over the `_op` constructors. Operands that cannot be
// broadcast together are a programming error here; use the `_op` functions
// to handle them as a `Result`.
macro_rules! impl_graph_binary_op {
    ($trait:ident, $method:ident, $op_fn:ident, $symbol:literal) => {
        impl<'a, 'b> $trait<&'b Graph> for &'a Graph {
            type Output = Graph;

            fn $method(self, rhs: &'b Graph) -> Graph {
                $op_fn(self, rhs).unwrap_or_else(|e| {
                    panic!("Graph {} failed: {}", $symbol, e)
                })
            }
        }

        impl $trait<Graph> for Graph {
            type Output = Graph;

            fn $method(self, rhs: Graph) -> Graph {
                (&self).$method(&rhs)
            }
        }

        impl<'b> $trait<&'b Graph> for Graph {
            type Output = Graph;

            fn $method(self, rhs: &'b Graph) -> Graph {
                (&self).$method(rhs)
            }
        }

        impl<'a> $trait<Graph> for &'a Graph {
            type Output = Graph;

            fn $method(self, rhs: Graph) -> Graph {
                self.$method(&rhs)
            }
        }

        impl<'a> $trait<f64> for &'a Graph {
            type Output = Graph;

            fn $method(self, rhs: f64) -> Graph {
                self.$method(&Graph::constant(rhs))
            }
        }

        impl $trait<f64> for Graph {
            type Output = Graph;

            fn $method(self, rhs: f64) -> Graph {
                (&self).$method(&Graph::constant(rhs))
            }
        }

        impl<'b> $trait<&'b Graph> for f64 {
            type Output = Graph;

            fn $method(self, rhs: &'b Graph) -> Graph {
                (&Graph::constant(self)).$method(rhs)
            }
        }

        impl $trait<Graph> for f64 {
            type Output = Graph;

            fn $method(self, rhs: Graph) -> Graph {
                (&Graph::constant(self)).$method(&rhs)
            }
        }
    };
}

impl_graph_binary_op!(Add, add, add_op, "+");
impl_graph_binary_op!(Sub, sub, sub_op, "-");
impl_graph_binary_op!(Mul, mul, mul_op, "*");
impl_graph_binary_op!(Div, div, div_op, "/");

impl<'a> Neg for &'a Graph {
    type Output = Graph;

    fn neg(self) -> Graph {
        neg_op(self).unwrap_or_else(|e| panic!("Graph negation failed: {}", e))
    }
}

impl Neg for Graph {
    type Output = Graph;

    fn neg(self) -> Graph {
        -&self
    }
}
