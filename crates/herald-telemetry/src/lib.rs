//! Herald Telemetry - Logging setup for Herald applications.
//!
//! Library crates in the workspace only emit `tracing` events. Binaries call
//! [`setup_logging`] once to install a subscriber built from a [`LogConfig`].
//!
//! # Example
//!
//! ```rust,no_run
//! use herald_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), herald_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("herald_events=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("Logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{FileLogConfig, FileRotation, LogConfig, LogFormat, LogTarget, setup_logging};
