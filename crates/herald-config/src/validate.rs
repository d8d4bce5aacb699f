//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Accepted `manager.fault_policy` values.
pub const FAULT_POLICIES: [&str; 2] = ["halt", "isolate"];
/// Accepted `logging.level` values.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
/// Accepted `logging.format` values.
pub const LOG_FORMATS: [&str; 4] = ["pretty", "compact", "json", "full"];

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_manager(config)?;
    validate_logging(config)?;
    validate_echo(config)?;
    Ok(())
}

fn one_of(field: &str, value: &str, accepted: &[&str]) -> ConfigResult<()> {
    if accepted.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        field: field.to_owned(),
        message: format!(
            "unsupported value '{value}'; expected one of: {}",
            accepted.join(", ")
        ),
    })
}

fn validate_manager(config: &Config) -> ConfigResult<()> {
    if config.manager.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "manager.name".to_owned(),
            message: "name must not be empty".to_owned(),
        });
    }
    one_of("manager.fault_policy", &config.manager.fault_policy, &FAULT_POLICIES)
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    one_of("logging.level", &config.logging.level, &LOG_LEVELS)?;
    one_of("logging.format", &config.logging.format, &LOG_FORMATS)
}

fn validate_echo(config: &Config) -> ConfigResult<()> {
    if config.echo.quit_words.iter().all(|word| word.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: "echo.quit_words".to_owned(),
            message: "at least one non-blank quit word is required".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: ConfigResult<()>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_unknown_fault_policy() {
        let mut config = Config::default();
        config.manager.fault_policy = "retry".to_owned();
        assert_eq!(field_of(validate(&config)), "manager.fault_policy");
    }

    #[test]
    fn test_rejects_blank_manager_name() {
        let mut config = Config::default();
        config.manager.name = "  ".to_owned();
        assert_eq!(field_of(validate(&config)), "manager.name");
    }

    #[test]
    fn test_rejects_unknown_level_and_format() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.level");

        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.format");
    }

    #[test]
    fn test_rejects_empty_quit_words() {
        let mut config = Config::default();
        config.echo.quit_words = vec![String::new()];
        assert_eq!(field_of(validate(&config)), "echo.quit_words");
    }
}
