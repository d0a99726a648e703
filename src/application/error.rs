//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add encoding and I/O context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("malformed JSON input: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("expected a JSON array of records, found {found}")]
    NotAnArray { found: &'static str },

    #[error("record {position} is not a JSON object (found {found})")]
    NotAnObject { position: usize, found: &'static str },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
