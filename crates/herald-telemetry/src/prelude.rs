//! Prelude module - commonly used types for convenient import.
//!
//! Use `use herald_telemetry::prelude::*;` to import all essential types.

// Errors
pub use crate::{TelemetryError, TelemetryResult};

// Logging configuration
pub use crate::{FileLogConfig, FileRotation, LogConfig, LogFormat, LogTarget};

// Setup
pub use crate::setup_logging;
