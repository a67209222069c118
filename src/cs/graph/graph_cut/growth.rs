//! Growth of the SOURCE and SINK search trees from the active set.

use super::store::{Parent, Tree};
use super::{ArcId, Capacity, Graph, NodeId};

impl<T: Capacity> Graph<T> {
    /// Roots every node with terminal residual capacity in the matching tree and
    /// queues it; every other node starts free.
    pub(super) fn init_trees(&mut self) {
        self.active.clear();
        self.orphans.clear();
        self.time = 0;

        for i in 0..self.nodes.len() {
            let node = &mut self.nodes[i];
            node.active = false;
            let tree = if node.tr_cap > T::zero() {
                Tree::Source
            } else if node.tr_cap < T::zero() {
                Tree::Sink
            } else {
                node.release();
                node.ts = 0;
                continue;
            };
            node.attach(tree, Parent::Terminal, 0, 1);
            self.set_active(i);
        }
    }

    /// Queues `i` unless it is already queued or being scanned.
    pub(super) fn set_active(&mut self, i: NodeId) {
        if !self.nodes[i].active {
            self.nodes[i].active = true;
            self.active.push_back(i);
        }
    }

    /// Pops the next queued node that is still in a tree. Nodes freed while
    /// queued are dropped here.
    pub(super) fn next_active(&mut self) -> Option<NodeId> {
        while let Some(i) = self.active.pop_front() {
            self.nodes[i].active = false;
            if !self.nodes[i].is_free() {
                return Some(i);
            }
        }
        None
    }

    /// Scans the residual arcs of tree node `i`, attaching free neighbours as
    /// its children. Returns the first arc joining the two trees, oriented from
    /// the SOURCE tree to the SINK tree.
    pub(super) fn grow(&mut self, i: NodeId) -> Option<ArcId> {
        let tree = self.nodes[i].tree;
        if tree == Tree::Free {
            return None;
        }
        let (ts, dist) = (self.nodes[i].ts, self.nodes[i].dist);

        for k in 0..self.nodes[i].arcs.len() {
            let a = self.nodes[i].arcs[k];
            let sister = self.sister(a);
            // SOURCE trees grow along outgoing residual arcs, SINK trees along
            // incoming ones.
            let residual = if tree == Tree::Source {
                self.r_cap(a)
            } else {
                self.r_cap(sister)
            };
            if residual <= T::zero() {
                continue;
            }

            let j = self.arcs[a].head;
            match self.nodes[j].tree {
                Tree::Free => {
                    self.nodes[j].attach(tree, Parent::Arc(sister), ts, dist + 1);
                    self.set_active(j);
                }
                other if other == tree => {}
                _ => {
                    return Some(if tree == Tree::Source { a } else { sister });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_roots_terminal_nodes() {
        let mut graph: Graph<i32> = Graph::new();
        graph.add_node(3).unwrap();
        graph.add_tweights(0, 0, 5).unwrap();
        graph.add_tweights(2, 4, 0).unwrap();
        graph.init_trees();

        assert_eq!(graph.nodes[0].tree, Tree::Source);
        assert_eq!(graph.nodes[0].parent, Some(Parent::Terminal));
        assert_eq!(graph.nodes[1].tree, Tree::Free);
        assert_eq!(graph.nodes[1].parent, None);
        assert_eq!(graph.nodes[2].tree, Tree::Sink);
        assert_eq!(graph.active.iter().copied().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_balanced_terminals_leave_node_free() {
        let mut graph: Graph<i32> = Graph::new();
        graph.add_node(1).unwrap();
        graph.add_tweights(0, 3, 3).unwrap();
        graph.init_trees();
        assert!(graph.nodes[0].is_free());
        assert!(graph.active.is_empty());
    }

    #[test]
    fn test_grow_attaches_free_neighbours() {
        let mut graph: Graph<i32> = Graph::new();
        graph.add_node(3).unwrap();
        graph.add_tweights(0, 0, 5).unwrap();
        graph.add_edge(0, 1, 2, 0).unwrap();
        graph.add_edge(2, 0, 2, 0).unwrap();
        graph.init_trees();

        let i = graph.next_active().unwrap();
        assert_eq!(graph.grow(i), None);
        assert_eq!(graph.nodes[1].tree, Tree::Source);
        assert_eq!(graph.nodes[1].dist, 2);
        match graph.nodes[1].parent {
            Some(Parent::Arc(a)) => assert_eq!(graph.arcs[a].head, 0),
            other => panic!("unexpected parent {:?}", other),
        }
        // 2 -> 0 offers no residual capacity away from the source root
        assert!(graph.nodes[2].is_free());
        assert_eq!(graph.next_active(), Some(1));
    }

    #[test]
    fn test_sink_tree_grows_along_incoming_arcs() {
        let mut graph: Graph<i32> = Graph::new();
        graph.add_node(3).unwrap();
        graph.add_tweights(0, 5, 0).unwrap();
        graph.add_edge(1, 0, 2, 0).unwrap();
        graph.add_edge(0, 2, 2, 0).unwrap();
        graph.init_trees();

        let i = graph.next_active().unwrap();
        assert_eq!(graph.grow(i), None);
        assert_eq!(graph.nodes[1].tree, Tree::Sink);
        assert!(graph.nodes[2].is_free());
    }

    #[test]
    fn test_grow_reports_connecting_arc_source_to_sink() {
        let mut graph: Graph<i32> = Graph::new();
        graph.add_node(2).unwrap();
        graph.add_tweights(0, 0, 5).unwrap();
        graph.add_tweights(1, 5, 0).unwrap();
        graph.add_edge(0, 1, 3, 0).unwrap();
        graph.init_trees();

        // Scan from the sink side: the reported arc must still point 0 -> 1.
        graph.active.pop_front();
        graph.nodes[0].active = false;
        let i = graph.next_active().unwrap();
        assert_eq!(i, 1);
        let a = graph.grow(i).unwrap();
        assert_eq!(graph.tail(a), 0);
        assert_eq!(graph.arcs[a].head, 1);
    }

    #[test]
    fn test_freed_nodes_are_dropped_from_active_set() {
        let mut graph: Graph<i32> = Graph::new();
        graph.add_node(2).unwrap();
        graph.add_tweights(0, 0, 1).unwrap();
        graph.add_tweights(1, 0, 1).unwrap();
        graph.init_trees();
        graph.nodes[0].release();
        assert_eq!(graph.next_active(), Some(1));
        assert_eq!(graph.next_active(), None);
    }
}
