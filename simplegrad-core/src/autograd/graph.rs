use crate::graph::Graph;
use crate::types::NodeId;
use std::rc::Rc;

/// Identifies one traversal of one root. Each visited node records the
/// generation under the root's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TraversalMark {
    pub(crate) root: NodeId,
    pub(crate) generation: u64,
}

/// Cached evaluation order of a root.
///
/// `order` holds the grad-bearing descendants in post-order (children before
/// parents). The root itself is not stored, so the cache never keeps its
/// own node alive; `includes_root` records whether it belongs at the end.
#[derive(Clone)]
pub(crate) struct Schedule {
    pub(crate) order: Rc<[Graph]>,
    pub(crate) includes_root: bool,
    pub(crate) mark: TraversalMark,
}

impl Schedule {
    pub(crate) fn len(&self) -> usize {
        self.order.len() + usize::from(self.includes_root)
    }

    /// Whether this schedule was built by the latest traversal of `root`.
    ///
    /// The root and every scheduled node must still carry the traversal
    /// mark the schedule was built with.
    pub(crate) fn is_current_for(&self, root: &Graph) -> bool {
        self.mark.root == root.id()
            && root.state().last_traversal(self.mark.root) == Some(self.mark.generation)
            && self
                .order
                .iter()
                .all(|node| node.state().last_traversal(self.mark.root) == Some(self.mark.generation))
    }
}

/// Recursively builds a topological sort of the graph below `node`.
///
/// Nodes are deduplicated through the traversal mark; nodes that do not
/// require grad are traversed but left out of `sorted`.
fn build_topo(node: &Graph, mark: TraversalMark, sorted: &mut Vec<Graph>) {
    {
        let mut state = node.state_mut();
        if state.last_traversal(mark.root) == Some(mark.generation) {
            return;
        }
        state.visit_marks.insert(mark.root, mark.generation);
    }
    for child in node.operands() {
        build_topo(child, mark, sorted);
    }
    if node.requires_grad() {
        sorted.push(node.clone());
    }
}

/// Runs a fresh traversal from `root` and stores the result in its cache.
pub(crate) fn rebuild_schedule(root: &Graph) -> Schedule {
    let generation = {
        let mut state = root.state_mut();
        state.schedule_generation += 1;
        state.schedule_generation
    };
    let mark = TraversalMark {
        root: root.id(),
        generation,
    };
    let mut sorted = Vec::new();
    build_topo(root, mark, &mut sorted);

    let includes_root = sorted.last().map_or(false, |last| last.ptr_eq(root));
    if includes_root {
        sorted.pop();
    }
    let schedule = Schedule {
        order: sorted.into(),
        includes_root,
        mark,
    };
    log::debug!(
        "Built schedule for root {} (generation {}): {} grad-bearing nodes",
        root.id(),
        generation,
        schedule.len()
    );
    root.state_mut().schedule = Some(schedule.clone());
    schedule
}

/// Returns the cached schedule of `root`, building it on first use.
pub(crate) fn schedule_for(root: &Graph) -> Schedule {
    let cached = root.state().schedule.clone();
    match cached {
        Some(schedule) => schedule,
        None => rebuild_schedule(root),
    }
}

impl Graph {
    /// Topological order (children before parents) of the grad-bearing
    /// nodes reachable from this root, the root last when it requires grad.
    pub fn schedule(&self) -> Vec<Graph> {
        let schedule = schedule_for(self);
        let mut order: Vec<Graph> = schedule.order.iter().cloned().collect();
        if schedule.includes_root {
            order.push(self.clone());
        }
        order
    }

    /// Drops the cached schedule; the next backward pass traverses again.
    pub fn invalidate_schedule(&self) {
        self.state_mut().schedule = None;
    }

    /// Whether a schedule is currently cached on this root.
    pub fn has_cached_schedule(&self) -> bool {
        self.state().schedule.is_some()
    }
}
