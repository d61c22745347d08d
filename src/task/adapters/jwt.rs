//! HS256 JWT identity resolver.
//!
//! Verifies the token signature and expiry, then reads the user identifier
//! from a configurable claim. The claim may be a JSON number or a numeric
//! string.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::fmt;

use crate::config::{AuthConfig, ConfigError};
use crate::task::{
    domain::UserId,
    ports::{AuthorizationError, IdentityResolver, Resolution, bearer_token},
};

/// Claim read for the user identifier when none is configured.
pub const DEFAULT_USER_CLAIM: &str = "sub";

/// Identity resolver for HS256-signed JSON Web Tokens.
#[derive(Clone)]
pub struct JwtIdentityResolver {
    key: DecodingKey,
    validation: Validation,
    user_claim: String,
}

impl fmt::Debug for JwtIdentityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtIdentityResolver")
            .field("user_claim", &self.user_claim)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

impl JwtIdentityResolver {
    /// Creates a resolver verifying tokens with `secret` and reading the
    /// user from the `sub` claim.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            user_claim: DEFAULT_USER_CLAIM.to_owned(),
        }
    }

    /// Builds a resolver from the `[auth]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when no JWT secret is configured.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        let secret = config
            .jwt_secret
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("auth.jwt_secret is required".to_owned()))?;
        let mut resolver = Self::new(secret)
            .with_user_claim(config.user_claim.clone())
            .with_leeway(config.leeway_secs);
        if let Some(issuer) = &config.issuer {
            resolver = resolver.with_issuer(issuer);
        }
        Ok(resolver)
    }

    /// Reads the user identifier from `claim` instead of `sub`.
    #[must_use]
    pub fn with_user_claim(mut self, claim: impl Into<String>) -> Self {
        self.user_claim = claim.into();
        self
    }

    /// Accepts tokens up to `seconds` past their expiry.
    #[must_use]
    pub const fn with_leeway(mut self, seconds: u64) -> Self {
        self.validation.leeway = seconds;
        self
    }

    /// Requires the `iss` claim to equal `issuer`.
    #[must_use]
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    /// Verifies a raw `Authorization` header value and extracts the user.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthorizationError`] describing why the credential was
    /// rejected.
    pub fn authenticate(&self, credential: &str) -> Result<UserId, AuthorizationError> {
        let token = bearer_token(credential).ok_or(AuthorizationError::MissingCredential)?;
        let token_data =
            decode::<Value>(token, &self.key, &self.validation).map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthorizationError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => AuthorizationError::Malformed(err.to_string()),
                _ => AuthorizationError::Rejected(err.to_string()),
            })?;
        subject_from_claim(token_data.claims.get(&self.user_claim), &self.user_claim)
    }
}

fn subject_from_claim(claim: Option<&Value>, name: &str) -> Result<UserId, AuthorizationError> {
    let invalid = || AuthorizationError::InvalidSubject(format!("claim '{name}'"));
    let raw = match claim {
        Some(Value::Number(number)) => number.as_i64().ok_or_else(invalid)?,
        Some(Value::String(text)) => text.trim().parse::<i64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    UserId::new(raw).map_err(|err| AuthorizationError::InvalidSubject(err.to_string()))
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve(&self, credential: &str) -> Resolution {
        match self.authenticate(credential) {
            Ok(user) => Resolution::Authenticated(user),
            Err(err) => {
                tracing::debug!(error = %err, "bearer token rejected");
                Resolution::Unauthorized
            }
        }
    }
}
