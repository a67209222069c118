//! Repairing the search trees after an augmentation.
//!
//! Each orphan either finds a new parent in its own tree or is released to the
//! free state, orphaning its children in turn. Orphans are kept on an explicit
//! worklist, so deep subtrees never recurse.
//!
//! A candidate parent is only accepted if its chain of parents still reaches a
//! terminal. Chains are walked at most once per pass: every node on a verified
//! chain is stamped with the current time and its distance to the root, and
//! later walks stop at the first stamped node. A chain that runs into an orphan
//! is rejected, which also rules out cycles through the orphan's own subtree.

use super::store::{Parent, Tree};
use super::{ArcId, Capacity, Graph, NodeId};

impl<T: Capacity> Graph<T> {
    pub(super) fn set_orphan_front(&mut self, i: NodeId) {
        self.nodes[i].parent = Some(Parent::Orphan);
        self.orphans.push_front(i);
    }

    pub(super) fn set_orphan_rear(&mut self, i: NodeId) {
        self.nodes[i].parent = Some(Parent::Orphan);
        self.orphans.push_back(i);
    }

    /// Resolves every pending orphan. On return the parent links form a forest
    /// again and each link has positive residual capacity toward the child's
    /// side of the cut.
    pub(super) fn adopt_orphans(&mut self) {
        while let Some(i) = self.orphans.pop_front() {
            if self.nodes[i].parent == Some(Parent::Orphan) {
                self.process_orphan(i);
            }
        }
    }

    fn process_orphan(&mut self, i: NodeId) {
        let tree = self.nodes[i].tree;

        // Roots keep their terminal link while it has residual capacity.
        let tr_cap = self.nodes[i].tr_cap;
        let rooted = match tree {
            Tree::Source => tr_cap > T::zero(),
            Tree::Sink => tr_cap < T::zero(),
            Tree::Free => false,
        };
        if rooted {
            self.nodes[i].attach(tree, Parent::Terminal, self.time, 1);
            self.stats.orphans_adopted += 1;
            return;
        }

        let mut best: Option<(ArcId, usize)> = None;
        for k in 0..self.nodes[i].arcs.len() {
            let a = self.nodes[i].arcs[k];
            if self.toward_child(tree, a) <= T::zero() {
                continue;
            }
            let j = self.arcs[a].head;
            if self.nodes[j].tree != tree {
                continue;
            }
            if let Some(d) = self.origin_distance(j) {
                if best.map_or(true, |(_, d_min)| d < d_min) {
                    best = Some((a, d));
                }
            }
        }

        match best {
            Some((a, d)) => {
                self.nodes[i].attach(tree, Parent::Arc(a), self.time, d + 1);
                self.stats.orphans_adopted += 1;
            }
            None => self.free_orphan(i, tree),
        }
    }

    /// Residual capacity available for flow between the node owning `a` and the
    /// neighbour `a` points to, in the direction flow travels in `tree`:
    /// neighbour to node in the SOURCE tree, node to neighbour in the SINK tree.
    fn toward_child(&self, tree: Tree, a: ArcId) -> T {
        match tree {
            Tree::Source => self.r_cap(self.sister(a)),
            _ => self.r_cap(a),
        }
    }

    /// Distance from `j` to its tree's terminal, or `None` if the chain of
    /// parents runs into an orphan.
    fn origin_distance(&mut self, j: NodeId) -> Option<usize> {
        let time = self.time;
        let mut d = 0;
        let mut k = j;
        loop {
            if self.nodes[k].ts == time {
                d += self.nodes[k].dist;
                break;
            }
            d += 1;
            match self.nodes[k].parent {
                Some(Parent::Terminal) => {
                    self.nodes[k].ts = time;
                    self.nodes[k].dist = 1;
                    break;
                }
                Some(Parent::Arc(a)) => k = self.arcs[a].head,
                Some(Parent::Orphan) | None => return None,
            }
        }

        let mut dist = d;
        let mut k = j;
        while self.nodes[k].ts != time {
            self.nodes[k].ts = time;
            self.nodes[k].dist = dist;
            dist -= 1;
            match self.nodes[k].parent {
                Some(Parent::Arc(a)) => k = self.arcs[a].head,
                _ => break,
            }
        }
        Some(d)
    }

    /// Releases `i`, queues neighbours that could regrow into the gap and
    /// orphans the children that hung off `i`.
    fn free_orphan(&mut self, i: NodeId, tree: Tree) {
        for k in 0..self.nodes[i].arcs.len() {
            let a = self.nodes[i].arcs[k];
            let j = self.arcs[a].head;
            if self.nodes[j].tree != tree {
                continue;
            }
            if self.toward_child(tree, a) > T::zero() {
                self.set_active(j);
            }
            if let Some(Parent::Arc(up)) = self.nodes[j].parent {
                if self.arcs[up].head == i {
                    self.set_orphan_rear(j);
                }
            }
        }
        self.nodes[i].release();
        self.stats.orphans_freed += 1;
        log::trace!("freed orphan {}", i);
    }
}
