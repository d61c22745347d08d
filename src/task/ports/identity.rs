//! Identity port: turns a bearer credential into an authenticated user.

use crate::task::domain::UserId;
use async_trait::async_trait;
use thiserror::Error;

/// Authentication scheme accepted in front of bearer credentials.
const BEARER_SCHEME: &str = "Bearer";

/// Outcome of resolving a credential.
///
/// There are exactly two outcomes; every failure mode collapses into
/// [`Resolution::Unauthorized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The credential identifies this user.
    Authenticated(UserId),
    /// The credential is missing, malformed, expired or otherwise invalid.
    Unauthorized,
}

impl Resolution {
    /// Returns the authenticated user, if any.
    #[must_use]
    pub const fn user_id(self) -> Option<UserId> {
        match self {
            Self::Authenticated(user_id) => Some(user_id),
            Self::Unauthorized => None,
        }
    }
}

/// Diagnostic reasons a credential was rejected.
///
/// These never reach clients; they are logged and then collapsed into
/// [`Resolution::Unauthorized`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    /// No credential was supplied.
    #[error("credential is missing")]
    MissingCredential,
    /// The credential is not a well-formed token.
    #[error("credential is malformed: {0}")]
    Malformed(String),
    /// The credential has expired.
    #[error("credential has expired")]
    Expired,
    /// The credential's signature or claims did not verify.
    #[error("credential rejected: {0}")]
    Rejected(String),
    /// The credential does not carry a usable user identifier.
    #[error("credential subject is invalid: {0}")]
    InvalidSubject(String),
}

/// Capability that resolves bearer credentials to user identities.
///
/// The concrete token scheme lives behind this trait so it can change
/// without touching the lifecycle service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves a raw credential, as taken from the `Authorization` header.
    async fn resolve(&self, credential: &str) -> Resolution;
}

/// Extracts the token from a raw `Authorization` header value.
///
/// A leading `Bearer` scheme, matched case-insensitively, is stripped when
/// present. Returns `None` for blank input or a scheme with no token.
#[must_use]
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let trimmed = header_value.trim();
    let token = strip_scheme(trimmed).unwrap_or(trimmed).trim_start();
    (!token.is_empty()).then_some(token)
}

fn strip_scheme(value: &str) -> Option<&str> {
    let scheme = value.get(..BEARER_SCHEME.len())?;
    let rest = value.get(BEARER_SCHEME.len()..)?;
    let separated = rest.is_empty() || rest.starts_with(char::is_whitespace);
    (separated && scheme.eq_ignore_ascii_case(BEARER_SCHEME)).then_some(rest)
}
