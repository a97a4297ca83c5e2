//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent violations of the tree construction contract.
/// These are independent of record files, config and CLI concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cycle detected in hierarchy: {0}")]
    CycleDetected(String),

    #[error("maximum tree depth exceeded: {limit}")]
    DepthExceeded { limit: usize },

    #[error("duplicate key in flat relation: {0}")]
    DuplicateKey(String),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
