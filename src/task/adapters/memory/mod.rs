//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit testing and local development without database dependencies.

mod identity;
mod task;

pub use identity::StaticIdentityResolver;
pub use task::InMemoryTaskRepository;
