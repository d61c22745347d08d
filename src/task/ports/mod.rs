//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services
//! and the transport-facing handler.

pub mod context;
pub mod identity;
pub mod lifecycle;
pub mod repository;
pub mod validator;

pub use context::{Interrupted, OperationContext};
pub use identity::{AuthorizationError, IdentityResolver, Resolution, bearer_token};
#[cfg(test)]
pub use identity::MockIdentityResolver;
pub use lifecycle::{TaskLifecycle, TaskLifecycleError, TaskLifecycleResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use validator::{
    TITLE_COLUMN_WIDTH, TaskRequestValidator, TaskValidationConfig, ValidationError,
    ValidationResult,
};
