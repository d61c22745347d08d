//! `PostgreSQL` adapters for task persistence.

mod models;
mod pool;
mod repository;
mod schema;

pub use pool::{MigrationError, TaskPgPool, apply_migrations, build_pool};
pub use repository::PostgresTaskRepository;
