//! Process-wide logging set-up.
//!
//! Events go to stdout in the configured format. When `logging.file` is
//! set, every event is also appended to that file as JSON through a
//! non-blocking writer; the returned [`WorkerGuard`] must be held until
//! shutdown so buffered lines are flushed.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::Subscriber;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter::ParseError, fmt, layer::SubscriberExt,
    util::SubscriberInitExt, util::TryInitError,
};

use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive does not parse.
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    /// The log file path has no file name.
    #[error("log file path has no file name: {}", .0.display())]
    LogPath(PathBuf),

    /// The log file could not be opened.
    #[error("failed to open log file: {0}")]
    File(#[from] InitError),

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Installs the global `tracing` subscriber described by `config`.
///
/// Call once per process. Returns the file writer's guard when a log file
/// is configured.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid, the log file
/// cannot be opened, or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, TelemetryError> {
    let (subscriber, guard) = build_subscriber(config)?;
    subscriber.try_init()?;
    Ok(guard)
}

/// Builds the subscriber described by `config` without installing it.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or the log file
/// cannot be opened.
pub fn build_subscriber(
    config: &LoggingConfig,
) -> Result<(impl Subscriber + Send + Sync + 'static, Option<WorkerGuard>), TelemetryError> {
    let filter = EnvFilter::try_new(&config.filter)?;
    let (file_output, guard) = config
        .file
        .as_deref()
        .map(file_layer)
        .transpose()?
        .unzip();
    let mut layers = vec![console_layer(config.format)];
    layers.extend(file_output);
    let subscriber = tracing_subscriber::registry().with(layers).with(filter);
    Ok((subscriber, guard))
}

fn console_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Text => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_current_span(false).boxed(),
    }
}

fn file_layer(path: &Path) -> Result<(BoxedLayer, WorkerGuard), TelemetryError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| TelemetryError::LogPath(path.to_path_buf()))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer()
        .json()
        .with_current_span(false)
        .with_ansi(false)
        .with_writer(writer)
        .boxed();
    Ok((layer, guard))
}
