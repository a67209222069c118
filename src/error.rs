//! Error types for graph construction and min-cut queries

use thiserror::Error;

/// Result type for graph cut operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the graph store, the solver and the tabular front end
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Node id outside `[0, len)`
    #[error("node index {index} out of range for graph with {len} nodes")]
    IndexOutOfRange { index: usize, len: usize },

    /// Negative or NaN capacity, or one that would overflow the graph's total
    #[error("invalid capacity: {0}")]
    InvalidCapacity(String),

    /// Operation not allowed in the graph's current lifecycle phase
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Malformed input to the tabular front end
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
