//! File logging configuration

use crate::constants::DEFAULT_LOG_RETENTION_DAYS;
use crate::paths::{
    default_log_dir, expand_tilde, DEFAULT_BRIDGE_LOG_FILENAME,
    DEFAULT_DAEMON_STARTUP_LOG_FILENAME,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for log files written by the bridge and the daemon launcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory holding all relayctl log files
    #[serde(default = "default_log_dir_value")]
    pub log_dir: PathBuf,
    /// File name for the bridge's own log (daily rotated)
    #[serde(default = "default_bridge_log_file")]
    pub bridge_log_file: String,
    /// File name capturing the daemon's stdout/stderr during startup
    #[serde(default = "default_daemon_startup_log_file")]
    pub daemon_startup_log_file: String,
    /// Whether the bridge logs to a file instead of stdout (default: true)
    #[serde(default = "default_file_logging_enabled")]
    pub file_logging_enabled: bool,
    /// Days of rotated bridge logs to keep, 0 to keep forever (default: 7)
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u32,
    /// Log timestamps in UTC instead of local time (default: false)
    #[serde(default)]
    pub use_utc: bool,
}

fn default_log_dir_value() -> PathBuf {
    default_log_dir()
}

fn default_bridge_log_file() -> String {
    DEFAULT_BRIDGE_LOG_FILENAME.to_string()
}

fn default_daemon_startup_log_file() -> String {
    DEFAULT_DAEMON_STARTUP_LOG_FILENAME.to_string()
}

fn default_file_logging_enabled() -> bool {
    true
}

fn default_log_retention_days() -> u32 {
    DEFAULT_LOG_RETENTION_DAYS
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_dir: default_log_dir_value(),
            bridge_log_file: default_bridge_log_file(),
            daemon_startup_log_file: default_daemon_startup_log_file(),
            file_logging_enabled: default_file_logging_enabled(),
            log_retention_days: default_log_retention_days(),
            use_utc: false,
        }
    }
}

impl LoggingConfig {
    /// Log directory with `~` expanded
    pub fn log_dir_path(&self) -> PathBuf {
        expand_tilde(&self.log_dir)
    }

    /// Full path of the bridge log file
    pub fn bridge_log_path(&self) -> PathBuf {
        self.log_dir_path().join(&self.bridge_log_file)
    }

    /// Full path of the daemon startup log file
    pub fn daemon_startup_log_path(&self) -> PathBuf {
        self.log_dir_path().join(&self.daemon_startup_log_file)
    }

    /// Validate configuration, returning a list of errors (empty if valid)
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.bridge_log_file.is_empty() {
            errors.push("logging.bridge_log_file must not be empty".to_string());
        }
        if self.daemon_startup_log_file.is_empty() {
            errors.push("logging.daemon_startup_log_file must not be empty".to_string());
        }

        errors
    }
}
