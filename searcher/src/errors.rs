use thiserror::Error;

/// Error produced when a graph is malformed or a search cannot be run.
///
/// Failing to find a path is not an error: searches report that
/// as `Ok(None)`.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Node {0} is not in the graph")]
    NodeNotFound(String),

    #[error("Edge {0} --> {1} is not in the graph")]
    EdgeNotFound(String, String),

    #[error("Self-loop on node {0} is not allowed")]
    SelfLoop(String),

    #[error("Weight must be a finite number, got {0}")]
    InvalidWeight(f64),

    #[error("Step limit exhausted after {0} steps")]
    StepLimitExhausted(usize),
}

/// Result when a search method might fail.
pub type Result<T> = std::result::Result<T, SearchError>;
