//! Bridge from `herald_config::Config` to domain types.

use anyhow::{Context, Result};
use herald_config::Config;
use herald_events::{FaultPolicy, ManagerConfig};
use herald_telemetry::{LogConfig, LogFormat};

use crate::echo::EchoSettings;

/// Convert config to [`ManagerConfig`].
///
/// # Errors
///
/// Returns an error if `manager.fault_policy` is not a known policy.
pub fn to_manager_config(cfg: &Config) -> Result<ManagerConfig> {
    let policy: FaultPolicy = cfg
        .manager
        .fault_policy
        .parse()
        .context("invalid manager.fault_policy")?;
    Ok(ManagerConfig::new(&cfg.manager.name).with_fault_policy(policy))
}

/// Convert config to [`LogConfig`].
#[must_use]
pub fn to_log_config(cfg: &Config) -> LogConfig {
    let format = cfg.logging.format.parse().unwrap_or(LogFormat::Compact);

    let mut log_config = LogConfig::new(&cfg.logging.level).with_format(format);

    for directive in &cfg.logging.directives {
        log_config = log_config.with_directive(directive);
    }

    log_config
}

/// Convert config to [`EchoSettings`].
#[must_use]
pub fn to_echo_settings(cfg: &Config) -> EchoSettings {
    EchoSettings {
        prompt: cfg.echo.prompt.clone(),
        quit_words: cfg
            .echo
            .quit_words
            .iter()
            .map(|word| word.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect(),
        max_ticks: cfg.echo.max_ticks,
    }
}
