//! Path utilities for relayctl configuration
//!
//! Provides home directory expansion and path resolution utilities.
//! Works cross-platform (Unix: ~/relayctl, Windows: %USERPROFILE%\relayctl).

use std::path::{Path, PathBuf};

use crate::constants::{ENV_RELAYCTL_CONFIG, ENV_RELAYCTL_HOME};

/// Default relayctl data directory name
pub const RELAYCTL_DIR_NAME: &str = "relayctl";

/// Default log subdirectory name
pub const LOG_DIR_NAME: &str = "log";

/// Default PID filename for the managed daemon
pub const DEFAULT_PID_FILENAME: &str = "relay.pid";

/// Default config filename
pub const DEFAULT_CONFIG_FILENAME: &str = "relayctl.toml";

/// Default bridge log filename (tracing logs with daily rotation)
pub const DEFAULT_BRIDGE_LOG_FILENAME: &str = "relayctl_bridge.log";

/// Default daemon startup log filename (captures stdout/stderr of the
/// spawned daemon process)
pub const DEFAULT_DAEMON_STARTUP_LOG_FILENAME: &str = "relay_daemon_startup.log";

/// Get the relayctl home directory.
///
/// Honors the `RELAYCTL_HOME` environment variable; otherwise returns
/// `~/relayctl` on Unix or `%USERPROFILE%\relayctl` on Windows. Falls back
/// to the current directory if home cannot be determined.
pub fn relayctl_home() -> PathBuf {
    if let Ok(home) = std::env::var(ENV_RELAYCTL_HOME) {
        if !home.is_empty() {
            return expand_tilde(Path::new(&home));
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(RELAYCTL_DIR_NAME)
}

/// Get the default PID file path for the managed daemon.
///
/// Returns `~/relayctl/relay.pid`.
pub fn default_pid_path() -> PathBuf {
    relayctl_home().join(DEFAULT_PID_FILENAME)
}

/// Get the default log directory.
///
/// Returns `~/relayctl/log/`.
pub fn default_log_dir() -> PathBuf {
    relayctl_home().join(LOG_DIR_NAME)
}

/// Get the default bridge log file path (daily rotation appends the date).
pub fn default_bridge_log_path() -> PathBuf {
    default_log_dir().join(DEFAULT_BRIDGE_LOG_FILENAME)
}

/// Get the default daemon startup log file path.
pub fn default_daemon_startup_log_path() -> PathBuf {
    default_log_dir().join(DEFAULT_DAEMON_STARTUP_LOG_FILENAME)
}

/// Get the default configuration file path.
///
/// Returns `~/relayctl/relayctl.toml`.
pub fn default_config_path() -> PathBuf {
    relayctl_home().join(DEFAULT_CONFIG_FILENAME)
}

/// Resolve the configuration file path from multiple sources.
///
/// Resolution order:
/// 1. explicit path (the `--config` CLI argument)
/// 2. `RELAYCTL_CONFIG` environment variable (if set and non-empty)
/// 3. default config path (`~/relayctl/relayctl.toml`)
///
/// Returns a tuple of (path, source) where source describes where the path
/// came from.
pub fn resolve_config_path(explicit: Option<&Path>) -> (PathBuf, &'static str) {
    if let Some(path) = explicit {
        return (expand_tilde(path), "--config CLI arg");
    }

    if let Ok(config_path) = std::env::var(ENV_RELAYCTL_CONFIG) {
        if !config_path.is_empty() {
            return (
                expand_tilde(Path::new(&config_path)),
                "RELAYCTL_CONFIG env var",
            );
        }
    }

    (default_config_path(), "default location")
}

/// Expand tilde (~) in a path to the user's home directory.
///
/// Paths without a leading tilde are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(stripped)
    } else {
        path.to_path_buf()
    }
}

/// Ensure the parent directory of a path exists.
///
/// Creates the parent directory and all intermediate directories if they
/// don't exist. Does nothing if the path has no parent or the parent already
/// exists.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_relayctl_home_not_empty() {
        std::env::remove_var(ENV_RELAYCTL_HOME);
        let home = relayctl_home();
        assert!(!home.as_os_str().is_empty());
        assert!(home.ends_with(RELAYCTL_DIR_NAME));
    }

    #[test]
    #[serial]
    fn test_relayctl_home_env_override() {
        std::env::set_var(ENV_RELAYCTL_HOME, "/custom/relayctl-home");
        let home = relayctl_home();
        std::env::remove_var(ENV_RELAYCTL_HOME);
        assert_eq!(home, PathBuf::from("/custom/relayctl-home"));
    }

    #[test]
    #[serial]
    fn test_default_pid_path() {
        std::env::remove_var(ENV_RELAYCTL_HOME);
        let pid_path = default_pid_path();
        assert!(pid_path.ends_with(DEFAULT_PID_FILENAME));
        assert!(pid_path.to_string_lossy().contains(RELAYCTL_DIR_NAME));
    }

    #[test]
    #[serial]
    fn test_default_log_dir() {
        std::env::remove_var(ENV_RELAYCTL_HOME);
        let log_dir = default_log_dir();
        assert!(log_dir.ends_with(LOG_DIR_NAME));
        assert!(log_dir.to_string_lossy().contains(RELAYCTL_DIR_NAME));
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_explicit_wins() {
        std::env::set_var(ENV_RELAYCTL_CONFIG, "/from/env/relayctl.toml");
        let (path, source) = resolve_config_path(Some(Path::new("/explicit/relayctl.toml")));
        std::env::remove_var(ENV_RELAYCTL_CONFIG);
        assert_eq!(path, PathBuf::from("/explicit/relayctl.toml"));
        assert_eq!(source, "--config CLI arg");
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_env_fallback() {
        std::env::set_var(ENV_RELAYCTL_CONFIG, "/from/env/relayctl.toml");
        let (path, source) = resolve_config_path(None);
        std::env::remove_var(ENV_RELAYCTL_CONFIG);
        assert_eq!(path, PathBuf::from("/from/env/relayctl.toml"));
        assert_eq!(source, "RELAYCTL_CONFIG env var");
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_default() {
        std::env::remove_var(ENV_RELAYCTL_CONFIG);
        std::env::remove_var(ENV_RELAYCTL_HOME);
        let (path, source) = resolve_config_path(None);
        assert!(path.ends_with(DEFAULT_CONFIG_FILENAME));
        assert_eq!(source, "default location");
    }

    #[test]
    fn test_expand_tilde() {
        // Path without tilde should be unchanged
        let no_tilde = Path::new("/absolute/path");
        assert_eq!(expand_tilde(no_tilde), no_tilde);

        let relative = Path::new("relative/path");
        assert_eq!(expand_tilde(relative), relative);

        // Path with tilde should expand
        let with_tilde = Path::new("~/foo/bar");
        let expanded = expand_tilde(with_tilde);
        assert!(expanded.is_absolute() || expanded.starts_with("."));
        assert!(expanded.ends_with("foo/bar") || expanded.ends_with("foo\\bar"));
    }

    #[test]
    fn test_ensure_parent_dir_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("a/b/c/file.txt");

        ensure_parent_dir(&nested_path).unwrap();
        assert!(nested_path.parent().unwrap().exists());
    }
}
