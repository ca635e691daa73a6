use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shape of every tensor and graph node.
///
/// Nodes are always 2-D: scalars are `(1, 1)` and 1-D inputs are reshaped
/// into column form `(n, 1)` when a tensor is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const SCALAR: Shape = Shape { rows: 1, cols: 1 };

    pub const fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    /// Number of elements covered by this shape.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether both dimensions are non-zero, as every tensor shape must be.
    pub fn is_positive(&self) -> bool {
        self.rows > 0 && self.cols > 0
    }

    pub fn is_scalar(&self) -> bool {
        *self == Shape::SCALAR
    }

    /// The shape with rows and columns swapped.
    pub fn transposed(&self) -> Shape {
        Shape::new(self.cols, self.rows)
    }

    /// Size of the given axis (0 = rows, 1 = cols).
    pub fn dim(&self, axis: usize) -> usize {
        if axis == 0 {
            self.rows
        } else {
            self.cols
        }
    }

    pub fn to_vec(&self) -> Vec<usize> {
        vec![self.rows, self.cols]
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}

/// Identity of a graph node, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

static NEXT_NODE_ID: AtomicUsize = AtomicUsize::new(0);

impl NodeId {
    pub(crate) fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
