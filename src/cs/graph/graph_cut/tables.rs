//! Building and solving a graph from numeric tables with 1-based node indices.
//!
//! The terminal table has one row per terminal weight, `(node, sink, source)`;
//! the edge table has one row per edge, `(from, to, capacity, reverse_capacity)`.

use ndarray::ArrayView2;

use super::{Graph, NodeId, Segment};
use crate::error::{Error, Result};

const TERMINAL_COLUMNS: usize = 3;
const EDGE_COLUMNS: usize = 4;

/// Result of [`cut_from_tables`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableCut {
    /// 1-based indices of the SOURCE-side nodes, ascending
    pub source_nodes: Vec<usize>,
    pub flow: f64,
}

/// Builds a graph with `n_nodes` nodes from the two tables, computes the
/// minimum cut and returns the SOURCE side together with the flow value.
///
/// # Examples
/// ```
/// use graphcut::cut_from_tables;
/// use ndarray::array;
///
/// let terminals = array![[1.0, 0.0, 4.0], [3.0, 10.0, 0.0]];
/// let edges = array![[1.0, 2.0, 2.0, 0.0], [2.0, 3.0, 10.0, 0.0]];
/// let cut = cut_from_tables(3, terminals.view(), edges.view()).unwrap();
/// assert_eq!(cut.source_nodes, vec![1]);
/// assert_eq!(cut.flow, 2.0);
/// ```
///
/// # Errors
/// * `InvalidInput` if a table has the wrong number of columns or refers to a
///   node outside `1..=n_nodes`
/// * `InvalidCapacity` if a weight is negative
pub fn cut_from_tables(
    n_nodes: usize,
    terminal_weights: ArrayView2<f64>,
    edge_weights: ArrayView2<f64>,
) -> Result<TableCut> {
    if terminal_weights.ncols() != TERMINAL_COLUMNS {
        return Err(Error::invalid_input(format!(
            "terminal weight table needs {} columns (node, sink, source), got {}",
            TERMINAL_COLUMNS,
            terminal_weights.ncols()
        )));
    }
    if edge_weights.ncols() != EDGE_COLUMNS {
        return Err(Error::invalid_input(format!(
            "edge weight table needs {} columns (from, to, capacity, reverse_capacity), got {}",
            EDGE_COLUMNS,
            edge_weights.ncols()
        )));
    }

    let mut graph: Graph<f64> = Graph::with_capacity(n_nodes, edge_weights.nrows());
    graph.add_node(n_nodes)?;

    for (row, weights) in terminal_weights.rows().into_iter().enumerate() {
        let node = node_index(weights[0], n_nodes, "terminal weight", "node", row)?;
        graph.add_tweights(node, weights[1], weights[2])?;
    }

    for (row, weights) in edge_weights.rows().into_iter().enumerate() {
        let from = node_index(weights[0], n_nodes, "edge weight", "from", row)?;
        let to = node_index(weights[1], n_nodes, "edge weight", "to", row)?;
        graph.add_edge(from, to, weights[2], weights[3])?;
    }

    let flow = graph.maxflow()?;
    let mut source_nodes = Vec::new();
    for node in 0..n_nodes {
        if graph.what_segment(node)? == Segment::Source {
            source_nodes.push(node + 1);
        }
    }
    log::debug!(
        "table cut: {} of {} nodes on the source side, flow {}",
        source_nodes.len(),
        n_nodes,
        flow
    );

    Ok(TableCut { source_nodes, flow })
}

/// Converts a 1-based table entry into a node id, truncating fractions.
fn node_index(
    value: f64,
    n_nodes: usize,
    table: &str,
    column: &str,
    row: usize,
) -> Result<NodeId> {
    if !value.is_finite() || value < 1.0 || value.trunc() > n_nodes as f64 {
        return Err(Error::invalid_input(format!(
            "{} index {} out of bounds in {} table row {} (expected 1..={})",
            column,
            value,
            table,
            row + 1,
            n_nodes
        )));
    }
    Ok(value.trunc() as usize - 1)
}
