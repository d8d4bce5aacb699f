//! Manager configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default manager name used in tracing spans.
pub const DEFAULT_MANAGER_NAME: &str = "herald";

/// What a drain does when a handler returns an error or panics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultPolicy {
    /// Stop at the first fault and return it from the draining call.
    ///
    /// Handlers after the faulting one are not invoked for that event, and
    /// notifications still queued wait for the next drain.
    #[default]
    Halt,
    /// Log each fault, keep delivering, and return every fault at the end.
    Isolate,
}

impl fmt::Display for FaultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Halt => write!(f, "halt"),
            Self::Isolate => write!(f, "isolate"),
        }
    }
}

/// Error parsing a [`FaultPolicy`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fault policy '{0}' (expected 'halt' or 'isolate')")]
pub struct ParseFaultPolicyError(String);

impl FromStr for FaultPolicy {
    type Err = ParseFaultPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "halt" => Ok(Self::Halt),
            "isolate" => Ok(Self::Isolate),
            _ => Err(ParseFaultPolicyError(s.to_owned())),
        }
    }
}

/// Configuration of one [`EventManager`](crate::EventManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Name recorded on every drain span.
    pub name: String,
    /// Fault handling during a drain.
    pub fault_policy: FaultPolicy,
}

impl ManagerConfig {
    /// Create a configuration with the given name and the default policy.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fault_policy: FaultPolicy::default(),
        }
    }

    /// Set the fault policy.
    #[must_use]
    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MANAGER_NAME)
    }
}
