//! Transport-facing layer: the request handler and its response envelopes.

pub mod envelope;
pub mod handler;

pub use envelope::{
    CollectionEnvelope, EnvelopeBuilder, FailureEnvelope, ResponseEnvelope, SuccessEnvelope,
    TIMESTAMP_FORMAT, UNAUTHORIZED_MESSAGE, UnauthorizedEnvelope, status_for,
};
pub use handler::{AUTHORIZATION_HEADER, TaskHandler};
