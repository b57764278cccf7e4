//! Configuration file loading and validation
//!
//! Provides functions to load configuration from TOML files:
//!
//! - [`load_config`] - Strict loader, errors if file missing (no side effects)
//! - [`write_default_config`] - Creates a default config file without loading
//!
//! # Usage
//!
//! ```rust,ignore
//! use relayctl_config::{load_config, resolve_config_path};
//!
//! let (path, _source) = resolve_config_path(None);
//! let config = load_config(&path)?;
//! ```

use crate::constants::ENV_RELAYCTL_API_KEY;
use crate::Config;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration template written by `relayctl init`.
///
/// Commented-out values document the built-in defaults; `{{api_key}}` is
/// replaced with a freshly generated key at init time.
pub const DEFAULT_CONFIG: &str = r#"# relayctl configuration
#
# Read by `relayctl serve` and the daemon lifecycle commands.
# Commented values show the built-in defaults.

[bridge]
# Address the HTTP bridge listens on.
# host = "127.0.0.1"
# port = 8765

# Shared secret checked against the `api_key` query parameter of every
# request. `relayctl serve` refuses to start while this is empty.
# Can be overridden with the RELAYCTL_API_KEY environment variable.
api_key = "{{api_key}}"

[management]
# gRPC management API of the proxy daemon (plaintext HTTP/2).
# host = "127.0.0.1"
# port = 10085
# connect_timeout_ms = 10000

[daemon]
# Command used to launch the proxy daemon and the arguments passed to it.
# command = "v2ray"
# args = []

# Where the launcher records the daemon's PID.
# pid_file = "~/relayctl/relay.pid"

# How long `relayctl daemon stop` waits for the process to exit after
# SIGTERM before giving up, and how often it polls while waiting.
# stop_timeout_ms = 10000
# poll_interval_ms = 100

[logging]
# When enabled, the bridge logs to log_dir/bridge_log_file with daily
# rotation instead of stdout.
# file_logging_enabled = true
# log_dir = "~/relayctl/log"
# log_retention_days = 7
# use_utc = false
"#;

/// Errors that can occur during config loading
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
    #[error("Config file not found: {0}. Run 'relayctl init' to create a default config.")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file (strict - no side effects)
///
/// This is the loader used by every command. It:
/// - Does NOT create files if missing (returns `ConfigError::NotFound`)
/// - Only reads and parses the config file
/// - Applies the `RELAYCTL_API_KEY` environment override after parsing
///
/// Use [`write_default_config`] (via `relayctl init`) to create a default
/// config.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Strict: error if file doesn't exist
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    debug!(path = %path.display(), "Loading config file");
    let content = std::fs::read_to_string(path)?;
    let mut config = load_config_from_str(&content)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Load configuration from a TOML string
pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Apply environment variable overrides to a parsed config.
///
/// Only `RELAYCTL_API_KEY` is supported; everything else comes from the
/// config file.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(api_key) = std::env::var(ENV_RELAYCTL_API_KEY) {
        if !api_key.is_empty() {
            debug!("Overriding bridge.api_key from {}", ENV_RELAYCTL_API_KEY);
            config.bridge.api_key = api_key;
        }
    }
}

/// Validate configuration values
///
/// The bridge API key is deliberately not checked here: lifecycle commands
/// must be able to load a keyless config. `relayctl serve` checks the key
/// itself via [`crate::BridgeConfig::validate_api_key`].
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut all_errors = Vec::new();

    all_errors.extend(config.bridge.validate());
    all_errors.extend(config.management.validate());
    all_errors.extend(config.daemon.validate());
    all_errors.extend(config.logging.validate());

    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(all_errors.join("; ")))
    }
}

/// Create a default configuration file at the specified path
///
/// Writes [`DEFAULT_CONFIG`] with `{{api_key}}` replaced by `api_key`.
/// Does nothing if the file already exists.
///
/// # Returns
/// * `Ok(PathBuf)` - Path to the config file (existing or newly created)
/// * `Err(std::io::Error)` - Failed to create file or directories
pub fn write_default_config(path: &Path, api_key: &str) -> Result<PathBuf, std::io::Error> {
    // If file already exists, just return the path
    if path.exists() {
        debug!(path = %path.display(), "Config file already exists");
        return Ok(path.to_path_buf());
    }

    crate::paths::ensure_parent_dir(path)?;

    debug!(path = %path.display(), "Writing default config file");
    std::fs::write(path, DEFAULT_CONFIG.replace("{{api_key}}", api_key))?;

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    // === Strict load_config tests ===

    #[test]
    fn test_load_config_strict_fails_on_missing_file() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("Config file not found"));
        assert!(err.to_string().contains("relayctl init"));
    }

    #[test]
    fn test_load_config_strict_loads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        std::fs::write(
            &config_path,
            r#"
[bridge]
port = 9999
api_key = "secret"
"#,
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.bridge.port, 9999);
        assert_eq!(config.bridge.api_key, "secret");
        // Untouched sections fall back to defaults
        assert_eq!(config.management.port, 10085);
        assert_eq!(config.daemon.command, "v2ray");
    }

    #[test]
    #[serial]
    fn test_load_config_env_override_replaces_api_key() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("relayctl.toml");
        std::fs::write(
            &config_path,
            r#"
[bridge]
api_key = "from-file"
"#,
        )
        .unwrap();

        std::env::set_var(ENV_RELAYCTL_API_KEY, "from-env");
        let config = load_config(&config_path).unwrap();
        std::env::remove_var(ENV_RELAYCTL_API_KEY);

        assert_eq!(config.bridge.api_key, "from-env");
    }

    #[test]
    fn test_load_config_from_str_rejects_invalid_values() {
        let result = load_config_from_str(
            r#"
[bridge]
port = 0

[daemon]
poll_interval_ms = 0
"#,
        );

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        let msg = err.to_string();
        assert!(msg.contains("bridge.port"));
        assert!(msg.contains("daemon.poll_interval_ms"));
    }

    #[test]
    fn test_load_config_from_str_rejects_malformed_toml() {
        let result = load_config_from_str("[bridge\nport = 1");
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    // === write_default_config tests ===

    #[test]
    fn test_write_default_config_creates_parseable_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sub").join("relayctl.toml");

        assert!(!config_path.exists());

        let result = write_default_config(&config_path, "abc123").unwrap();
        assert_eq!(result, config_path);
        assert!(config_path.exists());

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains(r#"api_key = "abc123""#));
        assert!(!content.contains("{{api_key}}"));

        let config = load_config_from_str(&content).unwrap();
        assert_eq!(config.bridge.api_key, "abc123");
    }

    #[test]
    fn test_write_default_config_preserves_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("relayctl.toml");
        std::fs::write(&config_path, "# hand edited\n").unwrap();

        write_default_config(&config_path, "new-key").unwrap();

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, "# hand edited\n");
    }
}
