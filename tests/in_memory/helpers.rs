//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrack::task::{
    adapters::memory::{InMemoryTaskRepository, StaticIdentityResolver},
    api::TaskHandler,
    domain::UserId,
    services::TaskLifecycleService,
};

/// Lifecycle service over the in-memory repository.
pub type MemoryService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Handler wired with static tokens.
pub type MemoryHandler = TaskHandler<MemoryService, StaticIdentityResolver, DefaultClock>;

/// Credential for user 42.
pub const ALICE: Option<&str> = Some("Bearer alice-token");

/// Credential for user 43.
pub const BOB: Option<&str> = Some("Bearer bob-token");

/// Builds a user identifier.
///
/// # Panics
///
/// Panics if `raw` is not positive.
#[must_use]
pub fn user(raw: i64) -> UserId {
    UserId::new(raw).expect("valid user id")
}

/// Handler and repository sharing one store.
pub struct Stack {
    /// Entry point under test.
    pub handler: MemoryHandler,
    /// Direct store access for assertions.
    pub repository: Arc<InMemoryTaskRepository>,
}

/// Provides a fresh handler stack for each test.
#[fixture]
pub fn stack() -> Stack {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);
    let identity = StaticIdentityResolver::new()
        .with_token("alice-token", user(42))
        .with_token("bob-token", user(43));
    let service = TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock));
    Stack {
        handler: TaskHandler::new(Arc::new(service), Arc::new(identity), clock),
        repository,
    }
}

/// Provides a service over a fresh in-memory store.
#[fixture]
pub fn service() -> MemoryService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}
