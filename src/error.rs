//! Error taxonomy for the solver entry points.

use thiserror::Error;

use crate::config::ConfigError;

/// Invalid-argument failures raised by the adapters before the search runs.
///
/// Once the engine starts it cannot fail on its own; unmatchable vertices
/// surface as unmatched entries in the result, not as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("cost matrix has no rows or no columns")]
    EmptyCostMatrix,
    #[error("cost matrix row {row} has {found} columns, expected {expected}")]
    RaggedCostMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("adjacency list has {found} rows, expected {expected}")]
    AdjacencyLengthMismatch { expected: usize, found: usize },
    #[error("one side of the bipartite graph is empty ({n_left} left, {n_right} right)")]
    EmptySide { n_left: usize, n_right: usize },
    #[error("edge ({left}, {right}) exceeds the right vertex count {n_right}")]
    EdgeEndpointOutOfRange {
        left: usize,
        right: usize,
        n_right: usize,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
