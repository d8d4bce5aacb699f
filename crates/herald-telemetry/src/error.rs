//! Telemetry error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while installing logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A log format name did not match any [`LogFormat`](crate::LogFormat).
    #[error("unknown log format '{name}' (expected one of: {expected})")]
    UnknownFormat {
        /// The rejected name, lowercased.
        name: String,
        /// Comma separated accepted names.
        expected: String,
    },

    /// The level or an extra directive is not a valid filter.
    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// The log directory could not be created.
    #[error("failed to create log directory {}: {source}", dir.display())]
    LogDirectory {
        /// Directory that was requested.
        dir: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The rolling file appender could not be opened.
    #[error("failed to open log file in {}: {source}", dir.display())]
    FileAppender {
        /// Directory that was requested.
        dir: PathBuf,
        /// Appender error.
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
