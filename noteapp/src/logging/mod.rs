//! Structured logging for NoteApp.
//!
//! Builds a `tracing_subscriber` registry from [`LoggingConfig`]: one fmt
//! layer for stdout and, optionally, one for a log file written through a
//! non-blocking `tracing_appender` worker.

#[cfg(test)]
mod tests;

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initialize the logging system with the given configuration.
///
/// When file logging is configured the returned guard must be kept alive;
/// dropping it flushes and stops the background writer. Calling `init` after
/// a global subscriber is already installed is a no-op.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let level = to_tracing_level(config.level);
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.stdout {
        layers.push(format_layer(config.format, std::io::stdout, true, level));
    }

    let guard = match &config.file {
        Some(file_path) => {
            let (writer, guard) = create_non_blocking_file(file_path)?;
            layers.push(format_layer(config.format, writer, false, level));
            Some(guard)
        }
        None => None,
    };

    if let Err(e) = tracing_subscriber::registry().with(layers).try_init() {
        tracing::debug!("Global subscriber already installed: {}", e);
    }

    Ok(guard)
}

/// Per-target filter: the configured level for our crates, warnings only
/// for the database engine.
fn target_filter(level: Level) -> Targets {
    Targets::new()
        .with_default(LevelFilter::from_level(level))
        .with_target("surrealdb", LevelFilter::WARN)
        .with_target("surrealdb_core", LevelFilter::WARN)
}

fn format_layer<W>(format: LogFormat, writer: W, ansi: bool, level: Level) -> BoxedLayer
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_level(true)
        .with_target(true)
        .with_line_number(true)
        .with_thread_ids(true);

    match format {
        LogFormat::Json => layer.json().with_filter(target_filter(level)).boxed(),
        LogFormat::Compact => layer.compact().with_filter(target_filter(level)).boxed(),
        LogFormat::Default => layer.pretty().with_filter(target_filter(level)).boxed(),
    }
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_appender =
        tracing_appender::rolling::never(directory, path.file_name().unwrap_or_default());

    Ok(tracing_appender::non_blocking(file_appender))
}

fn to_tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse::<LogLevel>()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}
