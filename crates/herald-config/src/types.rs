//! Configuration types for Herald applications.
//!
//! These types mirror the domain types of the other Herald crates as plain
//! strings and numbers; conversion happens at the application boundary.
//! Every struct implements [`Default`] so that a bare `[section]` header in
//! TOML produces a working configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event manager settings.
    pub manager: ManagerSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
    /// Echo application settings.
    pub echo: EchoSection,
}

// ---------------------------------------------------------------------------
// ManagerSection
// ---------------------------------------------------------------------------

/// Event manager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerSection {
    /// Name recorded on drain spans.
    pub name: String,
    /// `"halt"` stops a drain at the first handler fault; `"isolate"` logs
    /// faults and keeps delivering.
    pub fault_policy: String,
}

impl Default for ManagerSection {
    fn default() -> Self {
        Self {
            name: "herald".to_owned(),
            fault_policy: "halt".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"` (human-friendly), `"compact"` (one-line),
    /// `"json"` (structured), or `"full"` (verbose).
    pub format: String,
    /// Per-crate tracing directives (e.g. `["herald_events=trace"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// EchoSection
// ---------------------------------------------------------------------------

/// Echo application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EchoSection {
    /// Prompt printed before each line is read.
    pub prompt: String,
    /// Lines that end the session (matched case-insensitively, trimmed).
    pub quit_words: Vec<String>,
    /// Upper bound on loop iterations; `0` means unlimited.
    pub max_ticks: u64,
}

impl Default for EchoSection {
    fn default() -> Self {
        Self {
            prompt: "Say something or enter quit: ".to_owned(),
            quit_words: vec!["quit".to_owned()],
            max_ticks: 0,
        }
    }
}
