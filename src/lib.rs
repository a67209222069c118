pub mod cs;
pub mod error;

pub use cs::graph;
pub use cs::graph::graph_cut::{
    tables::{cut_from_tables, TableCut},
    Capacity, Graph, GraphCutConfig, MaxflowStats, NodeId, Segment,
};
pub use error::{Error, Result};
