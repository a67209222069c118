//! Node and arc arenas. Arcs are created in pairs and address each other by index.

use super::{ArcId, Capacity, Graph, NodeId};

/// Search tree a node currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tree {
    Free,
    Source,
    Sink,
}

/// Link from a tree node toward its tree root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Parent {
    /// Root, attached directly through its terminal capacity
    Terminal,
    /// Arc from this node to its parent
    Arc(ArcId),
    /// Link invalidated by the last augmentation, waiting for adoption
    Orphan,
}

#[derive(Debug, Clone)]
pub(super) struct Node<T> {
    /// Outgoing arcs; the reverse of each is the matching incoming arc
    pub(super) arcs: Vec<ArcId>,
    pub(super) tree: Tree,
    /// `None` exactly when `tree` is `Free`
    pub(super) parent: Option<Parent>,
    /// Residual terminal capacity: positive toward SOURCE, negative toward SINK
    pub(super) tr_cap: T,
    /// Time at which `dist` was last known to be exact
    pub(super) ts: u64,
    /// Number of links to the tree root
    pub(super) dist: usize,
    /// Queued in (or being scanned off) the active set
    pub(super) active: bool,
}

#[derive(Debug, Clone)]
pub(super) struct Arc<T> {
    pub(super) head: NodeId,
    pub(super) sister: ArcId,
    pub(super) r_cap: T,
}

impl<T: Capacity> Node<T> {
    pub(super) fn new() -> Self {
        Node {
            arcs: Vec::new(),
            tree: Tree::Free,
            parent: None,
            tr_cap: T::zero(),
            ts: 0,
            dist: 0,
            active: false,
        }
    }

    pub(super) fn is_free(&self) -> bool {
        self.tree == Tree::Free
    }

    pub(super) fn attach(&mut self, tree: Tree, parent: Parent, ts: u64, dist: usize) {
        self.tree = tree;
        self.parent = Some(parent);
        self.ts = ts;
        self.dist = dist;
    }

    pub(super) fn release(&mut self) {
        self.tree = Tree::Free;
        self.parent = None;
    }

    /// Folds new terminal capacities into the signed residual and returns the
    /// amount both sides share, which is flow through this node by construction.
    pub(super) fn add_terminal(&mut self, cap_source: T, cap_sink: T) -> T {
        let (mut source, mut sink) = (cap_source, cap_sink);
        if self.tr_cap > T::zero() {
            source = source + self.tr_cap;
        } else {
            sink = sink - self.tr_cap;
        }
        self.tr_cap = source - sink;
        if source < sink {
            source
        } else {
            sink
        }
    }
}

impl<T: Capacity> Graph<T> {
    /// Creates `from -> to` and its sister `to -> from`; returns the forward arc.
    pub(super) fn push_arc_pair(
        &mut self,
        from: NodeId,
        to: NodeId,
        capacity: T,
        reverse_capacity: T,
    ) -> ArcId {
        let forward = self.arcs.len();
        let backward = forward + 1;
        self.arcs.push(Arc {
            head: to,
            sister: backward,
            r_cap: capacity,
        });
        self.arcs.push(Arc {
            head: from,
            sister: forward,
            r_cap: reverse_capacity,
        });
        self.nodes[from].arcs.push(forward);
        self.nodes[to].arcs.push(backward);
        forward
    }

    pub(super) fn sister(&self, a: ArcId) -> ArcId {
        self.arcs[a].sister
    }

    /// Node the arc leaves from.
    pub(super) fn tail(&self, a: ArcId) -> NodeId {
        self.arcs[self.arcs[a].sister].head
    }

    pub(super) fn r_cap(&self, a: ArcId) -> T {
        self.arcs[a].r_cap
    }

    /// Moves `amount` of residual capacity from `a` to its sister.
    pub(super) fn push_along(&mut self, a: ArcId, amount: T) {
        let sister = self.arcs[a].sister;
        self.arcs[a].r_cap = self.arcs[a].r_cap - amount;
        self.arcs[sister].r_cap = self.arcs[sister].r_cap + amount;
    }
}
