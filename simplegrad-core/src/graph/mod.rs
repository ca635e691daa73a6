// src/graph/mod.rs

//! Graph nodes and the handle through which expressions are built.
//!
//! Every node of an expression is reached through a [`Graph`] handle, a
//! reference-counted pointer to an immutable [`Node`]. The topology and the
//! derived fields of a node (shape, `requires_grad`, reachable variables) are
//! fixed at construction; only the scratch state (gradient accumulator,
//! forward cache, traversal marker, cached schedule) and Variable payloads
//! mutate afterwards.
//!
//! Composite operands are copied when they are wired into a new node (see
//! [`Graph::graph_copy`]), while Value and Variable leaves are shared by
//! identity. A sub-expression used twice therefore owns two distinct
//! gradient accumulators, and a Variable used twice sums its contributions.

use crate::autograd::graph::Schedule;
use crate::error::GradError;
use crate::ops::comparison::CmpOp;
use crate::ops::lambda::ElementaryFn;
use crate::tensor::Tensor;
use crate::types::{NodeId, Shape};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

mod autograd_methods;
mod traits;

pub use autograd_methods::BackwardOptions;


/// The closed set of node kinds.
pub(crate) enum NodeKind {
    /// Constant payload; never requires grad.
    Value(Tensor),
    /// Trainable payload, mutated by optimizers between iterations.
    Variable(RefCell<Tensor>),
    Add(Graph, Graph),
    Mul(Graph, Graph),
    /// `base ^ exponent`.
    Pow(Graph, Graph),
    MatMul(Graph, Graph),
    /// Gradient-opaque relational operator producing 0/1 values.
    Compare(Graph, Graph, CmpOp),
    /// Generic node wrapping an elementary function strategy.
    Lambda(Graph, Rc<dyn ElementaryFn>),
}

/// Scratch state reset between evaluation cycles.
#[derive(Default)]
pub(crate) struct NodeState {
    pub(crate) grad: Option<Tensor>,
    pub(crate) forward: Option<Tensor>,
    /// Last traversal generation of each root that visited this node.
    pub(crate) visit_marks: HashMap<NodeId, u64>,
    pub(crate) schedule: Option<Schedule>,
    pub(crate) schedule_generation: u64,
}

pub(crate) struct Node {
    pub(crate) id: NodeId,
    pub(crate) shape: Shape,
    pub(crate) kind: NodeKind,
    pub(crate) requires_grad: bool,
    pub(crate) variables: BTreeSet<NodeId>,
    pub(crate) state: RefCell<NodeState>,
}

impl NodeState {
    pub(crate) fn last_traversal(&self, root: NodeId) -> Option<u64> {
        self.visit_marks.get(&root).copied()
    }
}

/// Handle to a node of an expression graph.
///
/// Cloning a handle is cheap and keeps the node identity; use
/// [`Graph::graph_copy`] for a structurally independent copy.
#[derive(Clone)]
pub struct Graph {
    pub(crate) node: Rc<Node>,
}

impl Graph {
    pub(crate) fn from_kind(shape: Shape, kind: NodeKind) -> Graph {
        let id = NodeId::fresh();
        let (requires_grad, variables) = match &kind {
            NodeKind::Value(_) => (false, BTreeSet::new()),
            NodeKind::Variable(_) => (true, BTreeSet::from([id])),
            _ => {
                let mut requires_grad = false;
                let mut variables = BTreeSet::new();
                for child in kind_operands(&kind) {
                    requires_grad |= child.node.requires_grad;
                    variables.extend(child.node.variables.iter().copied());
                }
                (requires_grad, variables)
            }
        };
        Graph {
            node: Rc::new(Node {
                id,
                shape,
                kind,
                requires_grad,
                variables,
                state: RefCell::new(NodeState::default()),
            }),
        }
    }

    /// A constant leaf holding `tensor`.
    pub fn value(tensor: Tensor) -> Graph {
        Graph::from_kind(tensor.shape(), NodeKind::Value(tensor))
    }

    /// A trainable leaf holding `tensor`.
    pub fn variable(tensor: Tensor) -> Graph {
        Graph::from_kind(tensor.shape(), NodeKind::Variable(RefCell::new(tensor)))
    }

    /// A `(1, 1)` constant leaf.
    pub fn constant(value: f64) -> Graph {
        Graph::value(Tensor::scalar(value))
    }

    pub(crate) fn zeros(shape: Shape) -> Graph {
        Graph::value(Tensor::filled(shape, 0.0))
    }

    pub fn id(&self) -> NodeId {
        self.node.id
    }

    pub fn shape(&self) -> Shape {
        self.node.shape
    }

    pub fn requires_grad(&self) -> bool {
        self.node.requires_grad
    }

    /// Ids of every Variable reachable from this node.
    pub fn reachable_variables(&self) -> &BTreeSet<NodeId> {
        &self.node.variables
    }

    pub fn depends_on(&self, variable: &Graph) -> bool {
        self.node.variables.contains(&variable.id())
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.node.kind, NodeKind::Variable(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node.kind, NodeKind::Value(_) | NodeKind::Variable(_))
    }

    /// Human-readable label of the node kind.
    pub fn name(&self) -> String {
        match &self.node.kind {
            NodeKind::Value(_) => "Value".to_string(),
            NodeKind::Variable(_) => "Variable".to_string(),
            NodeKind::Add(..) => "Add".to_string(),
            NodeKind::Mul(..) => "Mul".to_string(),
            NodeKind::Pow(..) => "Pow".to_string(),
            NodeKind::MatMul(..) => "MatMul".to_string(),
            NodeKind::Compare(_, _, op) => format!("Compare({})", op.symbol()),
            NodeKind::Lambda(_, f) => f.name().to_string(),
        }
    }

    pub(crate) fn operands(&self) -> Vec<&Graph> {
        kind_operands(&self.node.kind)
    }

    /// Handles to the children of this node, in operand order.
    pub fn children(&self) -> Vec<Graph> {
        self.operands().into_iter().cloned().collect()
    }

    pub(crate) fn state(&self) -> Ref<'_, NodeState> {
        self.node.state.borrow()
    }

    pub(crate) fn state_mut(&self) -> RefMut<'_, NodeState> {
        self.node.state.borrow_mut()
    }

    /// Last forward result; for leaves, the stored payload.
    pub fn current_value(&self) -> Option<Tensor> {
        match &self.node.kind {
            NodeKind::Value(t) => Some(t.clone()),
            NodeKind::Variable(payload) => Some(payload.borrow().clone()),
            _ => self.state().forward.clone(),
        }
    }

    /// Stored payload of a Value or Variable leaf.
    pub fn payload(&self) -> Option<Tensor> {
        match &self.node.kind {
            NodeKind::Value(t) => Some(t.clone()),
            NodeKind::Variable(payload) => Some(payload.borrow().clone()),
            _ => None,
        }
    }

    /// Accumulated gradient, if one has been written since the last reset.
    pub fn grad(&self) -> Option<Tensor> {
        self.state().grad.clone()
    }

    /// The single element of a `(1, 1)` node's value.
    pub fn scalar(&self) -> Result<f64, GradError> {
        if !self.shape().is_scalar() {
            return Err(GradError::NonScalar {
                shape: self.shape(),
            });
        }
        self.current_value()
            .ok_or(GradError::ForwardNotComputed { node: self.id() })?
            .to_scalar()
    }

    /// Replaces a Variable's payload. The shape must stay the same.
    pub fn set_value(&self, tensor: Tensor) -> Result<(), GradError> {
        self.update_value(|current| {
            *current = tensor;
            Ok(())
        })
    }

    /// Mutates a Variable's payload in place through `f`.
    pub fn update_value(
        &self,
        f: impl FnOnce(&mut Tensor) -> Result<(), GradError>,
    ) -> Result<(), GradError> {
        let NodeKind::Variable(payload) = &self.node.kind else {
            return Err(GradError::NotAVariable {
                operation: "set_value".to_string(),
            });
        };
        let mut updated = payload.borrow().clone();
        f(&mut updated)?;
        if updated.shape() != self.shape() {
            return Err(GradError::ShapeMismatch {
                expected: self.shape(),
                actual: updated.shape(),
                operation: "set_value".to_string(),
            });
        }
        *payload.borrow_mut() = updated;
        Ok(())
    }

    /// Structurally independent copy of this expression.
    ///
    /// Leaves are returned as-is (shared by identity); every composite node
    /// is rebuilt with fresh ids and empty scratch state.
    pub fn graph_copy(&self) -> Graph {
        let kind = match &self.node.kind {
            NodeKind::Value(_) | NodeKind::Variable(_) => return self.clone(),
            NodeKind::Add(a, b) => NodeKind::Add(a.graph_copy(), b.graph_copy()),
            NodeKind::Mul(a, b) => NodeKind::Mul(a.graph_copy(), b.graph_copy()),
            NodeKind::Pow(a, b) => NodeKind::Pow(a.graph_copy(), b.graph_copy()),
            NodeKind::MatMul(a, b) => NodeKind::MatMul(a.graph_copy(), b.graph_copy()),
            NodeKind::Compare(a, b, op) => NodeKind::Compare(a.graph_copy(), b.graph_copy(), *op),
            NodeKind::Lambda(input, f) => NodeKind::Lambda(input.graph_copy(), Rc::clone(f)),
        };
        Graph::from_kind(self.shape(), kind)
    }

    /// Number of unique nodes reachable from this node, itself included.
    pub fn node_count(&self) -> usize {
        let mut seen = HashSet::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            if seen.insert(node.id()) {
                stack.extend(node.children());
            }
        }
        seen.len()
    }

    pub fn ptr_eq(&self, other: &Graph) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

fn kind_operands(kind: &NodeKind) -> Vec<&Graph> {
    match kind {
        NodeKind::Value(_) | NodeKind::Variable(_) => Vec::new(),
        NodeKind::Add(a, b)
        | NodeKind::Mul(a, b)
        | NodeKind::Pow(a, b)
        | NodeKind::MatMul(a, b)
        | NodeKind::Compare(a, b, _) => vec![a, b],
        NodeKind::Lambda(input, _) => vec![input],
    }
}

impl From<Tensor> for Graph {
    fn from(tensor: Tensor) -> Self {
        Graph::value(tensor)
    }
}

impl From<&Graph> for Graph {
    fn from(graph: &Graph) -> Self {
        graph.clone()
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Graph {
                fn from(value: $t) -> Self {
                    Graph::constant(num_traits::ToPrimitive::to_f64(&value).unwrap_or(f64::NAN))
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, i64, u32, usize);
