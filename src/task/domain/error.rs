//! Error types for task domain values.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is not a positive integer.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(i64),

    /// The task identifier could not be parsed.
    #[error("malformed task identifier '{0}'")]
    MalformedTaskId(String),

    /// The user identifier is not a positive integer.
    #[error("invalid user identifier {0}, expected a positive integer")]
    InvalidUserId(i64),

    /// The user identifier could not be parsed.
    #[error("malformed user identifier '{0}'")]
    MalformedUserId(String),
}
