//! Validator port for client-submitted task payloads.

use crate::task::domain::TaskRequest;
use thiserror::Error;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A recoverable constraint violation naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty or whitespace-only.
    #[error("{field} must not be empty")]
    Empty {
        /// The offending field.
        field: &'static str,
    },

    /// A field exceeds its length limit.
    #[error("{field} has {actual} characters, exceeds limit of {max}")]
    TooLong {
        /// The offending field.
        field: &'static str,
        /// The maximum allowed number of characters.
        max: usize,
        /// The submitted number of characters.
        actual: usize,
    },

    /// A field could not be decoded.
    #[error("{field} is malformed: {reason}")]
    Malformed {
        /// The offending field.
        field: &'static str,
        /// Description of the decoding failure.
        reason: String,
    },
}

impl ValidationError {
    /// Creates a validation error for an undecodable field.
    #[must_use]
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } | Self::Malformed { field, .. } => {
                field
            }
        }
    }
}

/// Port for task request validation.
///
/// Implementations must be stateless and thread-safe, and must report
/// violations as errors rather than panicking.
pub trait TaskRequestValidator: Send + Sync {
    /// Checks `request` against the configured constraints and returns the
    /// normalized request.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    fn validate(&self, request: TaskRequest) -> ValidationResult<TaskRequest>;
}

/// Width of the `title` storage column; configured title limits may not
/// exceed it.
pub const TITLE_COLUMN_WIDTH: usize = 255;

/// Limits applied by task request validation.
///
/// # Examples
///
/// ```
/// use tasktrack::task::ports::TaskValidationConfig;
///
/// let config = TaskValidationConfig::default();
/// assert_eq!(config.max_title_length, 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskValidationConfig {
    /// Maximum title length in characters.
    pub max_title_length: usize,
    /// Maximum description length in characters.
    pub max_description_length: usize,
}

impl Default for TaskValidationConfig {
    fn default() -> Self {
        Self {
            max_title_length: TITLE_COLUMN_WIDTH,
            max_description_length: 10_000,
        }
    }
}
