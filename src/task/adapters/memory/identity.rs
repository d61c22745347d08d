//! Static token table for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::task::{
    domain::UserId,
    ports::{AuthorizationError, IdentityResolver, Resolution, bearer_token},
};

/// Identity resolver backed by a fixed token-to-user table.
///
/// # Examples
///
/// ```
/// use tasktrack::task::adapters::memory::StaticIdentityResolver;
/// use tasktrack::task::domain::UserId;
///
/// let user = UserId::new(42).expect("valid user id");
/// let resolver = StaticIdentityResolver::new().with_token("secret-token", user);
/// assert_eq!(resolver.lookup("Bearer secret-token"), Ok(user));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityResolver {
    tokens: HashMap<String, UserId>,
}

impl StaticIdentityResolver {
    /// Creates a resolver that knows no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` as a credential for `user`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, user: UserId) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }

    /// Looks up the user for a raw `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::MissingCredential`] for blank input and
    /// [`AuthorizationError::Rejected`] for unknown tokens.
    pub fn lookup(&self, credential: &str) -> Result<UserId, AuthorizationError> {
        let token = bearer_token(credential).ok_or(AuthorizationError::MissingCredential)?;
        self.tokens
            .get(token)
            .copied()
            .ok_or_else(|| AuthorizationError::Rejected("unknown token".to_owned()))
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentityResolver {
    async fn resolve(&self, credential: &str) -> Resolution {
        match self.lookup(credential) {
            Ok(user) => Resolution::Authenticated(user),
            Err(err) => {
                tracing::debug!(error = %err, "static credential rejected");
                Resolution::Unauthorized
            }
        }
    }
}
