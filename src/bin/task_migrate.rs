//! Applies the task schema to the configured `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! task_migrate [config-path]
//! ```
//!
//! Without a path, configuration comes from defaults, a `.env` file and the
//! process environment (`DATABASE_URL` and friends). With a path, the TOML
//! file is read first and the environment overrides it.

use std::path::PathBuf;

use tasktrack::config::{AppConfig, ConfigError};
use tasktrack::task::adapters::postgres::{MigrationError, apply_migrations, build_pool};
use tasktrack::telemetry::{TelemetryError, init_logging};
use thiserror::Error;

/// Errors that stop the migration tool.
#[derive(Debug, Error)]
enum MigrateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

fn main() -> Result<(), MigrateError> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    let _log_guard = init_logging(&config.logging)?;

    if !config.database.run_migrations {
        tracing::info!("database.run_migrations is false; nothing to do");
        return Ok(());
    }

    let pool = build_pool(&config.database)?;
    apply_migrations(&pool)?;
    tracing::info!("task schema is up to date");
    Ok(())
}
