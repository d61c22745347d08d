//! Uniform response envelopes.
//!
//! Every handler outcome is one of four structurally distinct JSON shapes:
//!
//! - success: `{ data, statusCode, referenceID, authorization, message, timestamp }`
//! - collection: `{ data: [..], count, statusCode, authorization, message, timestamp }`
//! - failure: `{ statusCode, message, field?, timestamp }`
//! - unauthorized: `{ message }`

use crate::task::{
    domain::{TaskId, UserId},
    ports::{Interrupted, TaskLifecycleError},
};
use http::StatusCode;
use mockable::Clock;
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Format used for envelope timestamps (UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The single message returned for every rejected credential.
pub const UNAUTHORIZED_MESSAGE: &str = "user account not authorized, please login or sign up!";

/// Message returned in place of storage error details.
pub const PERSISTENCE_FAILURE_MESSAGE: &str = "task storage is unavailable, please retry later";

/// Response wrapper returned by every handler operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope<T> {
    /// A single-record success.
    Success(SuccessEnvelope<T>),
    /// A list result with its count.
    Collection(CollectionEnvelope<T>),
    /// A recoverable failure.
    Failure(FailureEnvelope),
    /// The credential was rejected.
    Unauthorized(UnauthorizedEnvelope),
}

impl<T> ResponseEnvelope<T> {
    /// Returns the status code the transport should send.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Success(envelope) => envelope.status_code,
            Self::Collection(envelope) => envelope.status_code,
            Self::Failure(envelope) => envelope.status_code,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(envelope) => &envelope.message,
            Self::Collection(envelope) => &envelope.message,
            Self::Failure(envelope) => &envelope.message,
            Self::Unauthorized(envelope) => &envelope.message,
        }
    }

    /// Returns `true` for success and collection envelopes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Collection(_))
    }
}

/// Single-record success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnvelope<T> {
    /// The affected record.
    pub data: T,
    /// HTTP status code.
    #[serde(serialize_with = "serialize_status")]
    pub status_code: StatusCode,
    /// Identifier of the affected task.
    #[serde(rename = "referenceID")]
    pub reference_id: TaskId,
    /// The authenticated caller.
    pub authorization: UserId,
    /// Human-readable outcome.
    pub message: String,
    /// Formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

/// List success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEnvelope<T> {
    /// The caller's records.
    pub data: Vec<T>,
    /// Number of records in `data`.
    pub count: usize,
    /// HTTP status code.
    #[serde(serialize_with = "serialize_status")]
    pub status_code: StatusCode,
    /// The authenticated caller.
    pub authorization: UserId,
    /// Human-readable outcome.
    pub message: String,
    /// Formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

/// Failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureEnvelope {
    /// HTTP status code.
    #[serde(serialize_with = "serialize_status")]
    pub status_code: StatusCode,
    /// Human-readable reason.
    pub message: String,
    /// Offending request field for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    /// Formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

/// Unauthorized body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnauthorizedEnvelope {
    /// Always [`UNAUTHORIZED_MESSAGE`].
    pub message: String,
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

/// Maps a lifecycle error to its transport status.
#[must_use]
pub const fn status_for(err: &TaskLifecycleError) -> StatusCode {
    match err {
        TaskLifecycleError::Validation(_) => StatusCode::BAD_REQUEST,
        TaskLifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
        TaskLifecycleError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        TaskLifecycleError::Interrupted(Interrupted::DeadlineExceeded) => {
            StatusCode::GATEWAY_TIMEOUT
        }
        TaskLifecycleError::Interrupted(Interrupted::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
        TaskLifecycleError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
    }
}

/// Builds envelopes stamped with the injected clock.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder<C: Clock> {
    clock: Arc<C>,
}

impl<C: Clock> EnvelopeBuilder<C> {
    /// Creates a builder reading time from `clock`.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }

    fn timestamp(&self) -> String {
        self.clock.utc().format(TIMESTAMP_FORMAT).to_string()
    }

    /// Wraps a single record.
    #[must_use]
    pub fn success<T>(
        &self,
        status_code: StatusCode,
        reference_id: TaskId,
        authorization: UserId,
        message: impl Into<String>,
        data: T,
    ) -> ResponseEnvelope<T> {
        ResponseEnvelope::Success(SuccessEnvelope {
            data,
            status_code,
            reference_id,
            authorization,
            message: message.into(),
            timestamp: self.timestamp(),
        })
    }

    /// Wraps a list of records with their count.
    #[must_use]
    pub fn collection<T>(
        &self,
        authorization: UserId,
        message: impl Into<String>,
        data: Vec<T>,
    ) -> ResponseEnvelope<T> {
        ResponseEnvelope::Collection(CollectionEnvelope {
            count: data.len(),
            data,
            status_code: StatusCode::OK,
            authorization,
            message: message.into(),
            timestamp: self.timestamp(),
        })
    }

    /// Converts a lifecycle error into a failure envelope.
    ///
    /// Storage error details stay in the logs; clients receive
    /// [`PERSISTENCE_FAILURE_MESSAGE`].
    #[must_use]
    pub fn failure<T>(&self, err: &TaskLifecycleError) -> ResponseEnvelope<T> {
        let (message, field) = match err {
            TaskLifecycleError::Validation(validation) => {
                (validation.to_string(), Some(validation.field()))
            }
            TaskLifecycleError::Persistence(_) => (PERSISTENCE_FAILURE_MESSAGE.to_owned(), None),
            other => (other.to_string(), None),
        };
        ResponseEnvelope::Failure(FailureEnvelope {
            status_code: status_for(err),
            message,
            field,
            timestamp: self.timestamp(),
        })
    }

    /// Returns the unauthorized envelope.
    #[must_use]
    pub fn unauthorized<T>(&self) -> ResponseEnvelope<T> {
        ResponseEnvelope::Unauthorized(UnauthorizedEnvelope {
            message: UNAUTHORIZED_MESSAGE.to_owned(),
        })
    }
}
