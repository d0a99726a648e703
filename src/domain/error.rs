//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::key::NodeKey;

/// Domain errors represent violations of the record/hierarchy contract.
/// These are independent of encoding and I/O concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("record {position} is missing required field '{field}'")]
    MissingField { position: usize, field: String },

    #[error("record {position} has unsupported identifier in '{field}': {value}")]
    InvalidKey {
        position: usize,
        field: String,
        value: String,
    },

    #[error("invalid hierarchy: {0}")]
    InvalidHierarchy(#[from] HierarchyViolation),
}

/// Structural problems detected by strict validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyViolation {
    #[error("no record has a null parent identifier")]
    NoRoot,

    #[error("more than one root record: {}", join_keys(.0))]
    MultipleRoots(Vec<NodeKey>),

    #[error("identifier defined more than once: {0}")]
    DuplicateId(NodeKey),

    #[error("parent identifier {0} is referenced but never defined")]
    OrphanReference(NodeKey),

    #[error("{} record(s) not reachable from the root: {}", .0.len(), join_keys(.0))]
    Unreachable(Vec<NodeKey>),
}

fn join_keys(keys: &[NodeKey]) -> String {
    use itertools::Itertools;
    keys.iter().join(", ")
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
