//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge `~/.herald/config.toml` (user)
//! 3. Merge the file passed on the command line (explicit)
//! 4. Apply `HERALD_LOG` to `logging.level`
//! 5. Deserialize merged tree → `Config`
//! 6. Validate

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::{deep_merge, set_path};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Environment variable that overrides `logging.level`.
pub const LOG_ENV_VAR: &str = "HERALD_LOG";

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A loaded configuration and the files it was built from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The merged, validated configuration.
    pub config: Config,
    /// Files that contributed a layer, lowest precedence first.
    pub loaded_files: Vec<PathBuf>,
}

/// Load the configuration with layered file precedence.
///
/// `explicit` is a file the user asked for by path; unlike the user layer it
/// must exist. `home_override` replaces the `~/.herald` directory.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is unreadable or malformed,
/// or if the merged configuration fails validation.
pub fn load(explicit: Option<&Path>, home_override: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    let herald_dir = match home_override {
        Some(dir) => dir.to_path_buf(),
        None => home_directory()?.join(".herald"),
    };
    let env_level = std::env::var(LOG_ENV_VAR).ok().filter(|v| !v.trim().is_empty());
    load_layers(&herald_dir, explicit, env_level.as_deref())
}

fn load_layers(
    herald_dir: &Path,
    explicit: Option<&Path>,
    env_level: Option<&str>,
) -> ConfigResult<ResolvedConfig> {
    // 1. Embedded defaults.
    let mut merged: toml::Value = toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
        path: "<embedded defaults>".to_owned(),
        source: e,
    })?;
    let mut loaded_files = Vec::new();

    // 2. User config.
    let user_path = herald_dir.join("config.toml");
    if let Some(overlay) = try_load_file(&user_path)? {
        deep_merge(&mut merged, &overlay);
        debug!(path = %user_path.display(), "loaded user config");
        loaded_files.push(user_path);
    }

    // 3. Explicit config.
    if let Some(path) = explicit {
        let overlay = read_file(path)?;
        deep_merge(&mut merged, &overlay);
        debug!(path = %path.display(), "loaded config");
        loaded_files.push(path.to_path_buf());
    }

    // 4. Environment override.
    if let Some(level) = env_level {
        debug!(var = LOG_ENV_VAR, level, "overriding logging.level from environment");
        set_path(&mut merged, "logging", "level", toml::Value::String(level.trim().to_owned()));
    }

    // 5–6. Deserialize and validate.
    let config: Config = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: "<merged config>".to_owned(),
            source: e,
        })?;
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        loaded_files,
    })
}

/// Load a config from a specific file path (no layering).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let value = read_file(path)?;
    let config: Config = value
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;
    validate::validate(&config)?;
    Ok(config)
}

/// Try to load a file, returning `None` if the file doesn't exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    match read_file(path) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::ReadError { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            Ok(None)
        },
        Err(e) => Err(e),
    }
}

/// Read and parse one TOML file.
///
/// Uses a single read operation so there is no window between a size check
/// and the read.
fn read_file(path: &Path) -> ConfigResult<toml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let size = u64::try_from(content.len()).unwrap_or(u64::MAX);
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {size} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit"
            ),
        });
    }

    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Determine the user's home directory.
fn home_directory() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_deserialize_to_default_config() {
        let config: Config = toml::from_str(DEFAULTS_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_with_no_files_uses_defaults() {
        let home = tempfile::tempdir().unwrap();
        let resolved = load_layers(home.path(), None, None).unwrap();

        assert_eq!(resolved.config, Config::default());
        assert!(resolved.loaded_files.is_empty());
    }

    #[test]
    fn test_user_then_explicit_precedence() {
        let home = tempfile::tempdir().unwrap();
        write(
            home.path(),
            "config.toml",
            r#"
            [manager]
            name = "user"
            fault_policy = "isolate"

            [echo]
            max_ticks = 5
        "#,
        );
        let explicit = write(home.path(), "run.toml", "[manager]\nname = \"explicit\"\n");

        let resolved = load_layers(home.path(), Some(&explicit), None).unwrap();
        let config = resolved.config;

        assert_eq!(config.manager.name, "explicit");
        assert_eq!(config.manager.fault_policy, "isolate");
        assert_eq!(config.echo.max_ticks, 5);
        assert_eq!(config.echo.quit_words, vec!["quit"]);
        assert_eq!(resolved.loaded_files.len(), 2);
        assert_eq!(resolved.loaded_files[1], explicit);
    }

    #[test]
    fn test_env_level_overrides_files() {
        let home = tempfile::tempdir().unwrap();
        write(home.path(), "config.toml", "[logging]\nlevel = \"warn\"\n");

        let resolved = load_layers(home.path(), None, Some("debug")).unwrap();
        assert_eq!(resolved.config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_env_level_fails_validation() {
        let home = tempfile::tempdir().unwrap();
        let result = load_layers(home.path(), None, Some("loud"));
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { field, .. }) if field == "logging.level"
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let home = tempfile::tempdir().unwrap();
        let missing = home.path().join("absent.toml");
        let result = load_layers(home.path(), Some(&missing), None);
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_malformed_user_file_is_a_parse_error() {
        let home = tempfile::tempdir().unwrap();
        write(home.path(), "config.toml", "[manager\nname = ");
        let result = load_layers(home.path(), None, None);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_wrong_type_is_a_parse_error() {
        let home = tempfile::tempdir().unwrap();
        write(home.path(), "config.toml", "[echo]\nmax_ticks = \"many\"\n");
        let result = load_layers(home.path(), None, None);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_file_nonexistent() {
        let result = load_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_file_single_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "only.toml", "[echo]\nprompt = \"> \"\n");
        let config = load_file(&path).unwrap();
        assert_eq!(config.echo.prompt, "> ");
        assert_eq!(config.manager.name, "herald");
    }

    #[test]
    fn test_try_load_file_missing() {
        let result = try_load_file(Path::new("/nonexistent/config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_oversized_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let data = "x = \"".to_owned() + &"a".repeat(1_100_000) + "\"";
        let file_path = write(dir.path(), "huge.toml", &data);

        let result = try_load_file(&file_path);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "Expected ValidationError for oversized config, got: {result:?}"
        );
    }

    /// Formatted log output captured from a scoped subscriber.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            std::io::Write::write(&mut *self.0.lock().unwrap(), buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn load_logged_at(level: tracing::Level) -> String {
        let home = tempfile::tempdir().unwrap();
        write(home.path(), "config.toml", "[echo]\nmax_ticks = 1\n");

        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        let resolved = tracing::subscriber::with_default(subscriber, || {
            load_layers(home.path(), None, None).unwrap()
        });
        assert_eq!(resolved.loaded_files.len(), 1);

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_loaded_files_are_not_logged_at_info() {
        // Loading runs before the application's subscriber is installed.
        assert!(load_logged_at(tracing::Level::INFO).is_empty());
        assert!(load_logged_at(tracing::Level::DEBUG).contains("loaded user config"));
    }
}
