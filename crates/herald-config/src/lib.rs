#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Layered configuration for Herald applications.
//!
//! # Usage
//!
//! ```rust,no_run
//! use herald_config::Config;
//!
//! let resolved = Config::load(None).unwrap();
//! println!("Manager: {}", resolved.config.manager.name);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Environment** (`HERALD_LOG`), for `logging.level` only
//! 2. **Explicit** file passed with `--config`
//! 3. **User** (`~/.herald/config.toml`)
//! 4. **Embedded defaults** (`defaults.toml` compiled into the binary)
//!
//! # Design
//!
//! This crate has **no dependencies on other internal herald crates**.
//! Conversion from config types to domain types happens in the CLI's bridge
//! module.

/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Layered configuration merging.
pub mod merge;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

use std::path::Path;

// Re-export primary types at the crate root.
pub use error::{ConfigError, ConfigResult};
pub use loader::{LOG_ENV_VAR, ResolvedConfig};
pub use types::*;

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, None)
    }

    /// Load configuration with an explicit `.herald` directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load_with_home(explicit: Option<&Path>, herald_dir: &Path) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, Some(herald_dir))
    }

    /// Load configuration from a single file (no layering).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
