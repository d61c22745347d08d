//! Connection pool construction and schema migration.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Ordered migrations applied at start-up. Every script is idempotent.
const MIGRATIONS: &[(&str, &str)] = &[(
    "2026-10-01-000000_create_tasks",
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql"),
)];

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The pool could not be built or no connection became available.
    #[error("failed to obtain a database connection: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// A migration script failed.
    #[error("migration {name} failed: {source}")]
    Script {
        /// Migration directory name.
        name: &'static str,
        /// Underlying database error.
        #[source]
        source: diesel::result::Error,
    },
}

/// Builds the shared connection pool from the `[database]` section.
///
/// # Errors
///
/// Returns [`MigrationError::Pool`] when the pool cannot establish its
/// initial connections.
pub fn build_pool(config: &DatabaseConfig) -> Result<TaskPgPool, MigrationError> {
    let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_idle))
        .max_lifetime(Some(Duration::from_secs(config.max_lifetime_secs)))
        .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
        .build(manager)?;
    tracing::info!(
        max_connections = config.max_connections,
        min_idle = config.min_idle,
        "database pool ready"
    );
    Ok(pool)
}

/// Applies every schema migration in order.
///
/// # Errors
///
/// Returns [`MigrationError`] when no connection is available or a script
/// fails.
pub fn apply_migrations(pool: &TaskPgPool) -> Result<(), MigrationError> {
    let mut pooled = pool.get()?;
    let connection: &mut PgConnection = &mut pooled;
    for &(name, sql) in MIGRATIONS {
        connection
            .batch_execute(sql)
            .map_err(|source| MigrationError::Script { name, source })?;
        tracing::info!(migration = name, "migration applied");
    }
    Ok(())
}
