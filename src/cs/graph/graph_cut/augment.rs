//! Pushing flow along a SOURCE -> SINK path found by tree growth.

use super::store::Parent;
use super::{ArcId, Capacity, Graph, NodeId};

impl<T: Capacity> Graph<T> {
    /// Pushes the bottleneck capacity along the path through `middle`, which
    /// joins a SOURCE tree node to a SINK tree node. Every tree node whose link
    /// toward its root saturates becomes an orphan.
    pub(super) fn augment(&mut self, middle: ArcId) {
        let source_end = self.tail(middle);
        let sink_end = self.arcs[middle].head;

        let mut bottleneck = self.r_cap(middle);
        let mut i = source_end;
        while let Some(a) = self.parent_arc(i) {
            bottleneck = min_cap(bottleneck, self.r_cap(self.sister(a)));
            i = self.arcs[a].head;
        }
        bottleneck = min_cap(bottleneck, self.nodes[i].tr_cap);

        let mut i = sink_end;
        while let Some(a) = self.parent_arc(i) {
            bottleneck = min_cap(bottleneck, self.r_cap(a));
            i = self.arcs[a].head;
        }
        bottleneck = min_cap(bottleneck, -self.nodes[i].tr_cap);

        self.push_along(middle, bottleneck);

        // SOURCE half: flow runs from each parent down to its child.
        let mut i = source_end;
        while let Some(a) = self.parent_arc(i) {
            let down = self.sister(a);
            self.push_along(down, bottleneck);
            if self.r_cap(down) <= T::zero() {
                self.set_orphan_front(i);
            }
            i = self.arcs[a].head;
        }
        self.nodes[i].tr_cap = self.nodes[i].tr_cap - bottleneck;
        if self.nodes[i].tr_cap <= T::zero() {
            self.set_orphan_front(i);
        }

        // SINK half: flow runs from each child up to its parent.
        let mut i = sink_end;
        while let Some(a) = self.parent_arc(i) {
            self.push_along(a, bottleneck);
            if self.r_cap(a) <= T::zero() {
                self.set_orphan_front(i);
            }
            i = self.arcs[a].head;
        }
        self.nodes[i].tr_cap = self.nodes[i].tr_cap + bottleneck;
        if self.nodes[i].tr_cap >= T::zero() {
            self.set_orphan_front(i);
        }

        self.flow = self.flow + bottleneck;
        self.stats.augmentations += 1;
        log::trace!(
            "augmented {:?} through arc {} ({} -> {})",
            bottleneck,
            middle,
            source_end,
            sink_end
        );
    }

    /// Arc from `i` to its parent, or `None` at a tree root.
    fn parent_arc(&self, i: NodeId) -> Option<ArcId> {
        match self.nodes[i].parent {
            Some(Parent::Arc(a)) => Some(a),
            parent => {
                debug_assert_eq!(parent, Some(Parent::Terminal), "broken tree at node {}", i);
                None
            }
        }
    }
}

fn min_cap<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}
