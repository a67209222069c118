pub mod graph_cut;

pub use graph_cut::{Capacity, Graph, GraphCutConfig, MaxflowStats, NodeId, Segment};
