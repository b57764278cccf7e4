//! Proxy daemon process configuration

use crate::constants::{DEFAULT_DAEMON_POLL_INTERVAL_MS, DEFAULT_STOP_TIMEOUT_MS};
use crate::paths::{default_pid_path, expand_tilde};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for supervising the proxy daemon process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Command used to launch the daemon (default: "v2ray")
    #[serde(default = "default_command")]
    pub command: String,
    /// Arguments passed to the daemon command
    #[serde(default)]
    pub args: Vec<String>,
    /// Path of the PID file the supervisor maintains
    #[serde(default = "default_pid_file")]
    pub pid_file: PathBuf,
    /// Upper bound on waiting for the daemon to exit after SIGTERM, in
    /// milliseconds (default: 10000)
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
    /// Interval between liveness polls while waiting, in milliseconds
    /// (default: 100)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_command() -> String {
    "v2ray".to_string()
}

fn default_pid_file() -> PathBuf {
    default_pid_path()
}

fn default_stop_timeout_ms() -> u64 {
    DEFAULT_STOP_TIMEOUT_MS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_DAEMON_POLL_INTERVAL_MS
}

impl Default for DaemonConfig {
    fn default() -> Self {
        DaemonConfig {
            command: default_command(),
            args: Vec::new(),
            pid_file: default_pid_file(),
            stop_timeout_ms: default_stop_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl DaemonConfig {
    /// PID file path with `~` expanded.
    ///
    /// Config files may use tilde paths; every consumer must go through this
    /// accessor rather than reading `pid_file` directly.
    pub fn pid_path(&self) -> PathBuf {
        expand_tilde(&self.pid_file)
    }

    /// Validate configuration, returning a list of errors (empty if valid)
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.command.is_empty() {
            errors.push("daemon.command must not be empty".to_string());
        }
        if self.poll_interval_ms == 0 {
            errors.push("daemon.poll_interval_ms must be greater than 0".to_string());
        }
        if self.stop_timeout_ms < self.poll_interval_ms {
            errors.push(
                "daemon.stop_timeout_ms must be at least daemon.poll_interval_ms".to_string(),
            );
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daemon_config_defaults() {
        let config = DaemonConfig::default();
        assert_eq!(config.command, "v2ray");
        assert!(config.args.is_empty());
        assert_eq!(config.stop_timeout_ms, 10_000);
        assert_eq!(config.poll_interval_ms, 100);
        assert!(config.pid_file.ends_with("relay.pid"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_daemon_config_rejects_zero_poll_interval() {
        let config = DaemonConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("poll_interval_ms")));
    }

    #[test]
    fn test_daemon_config_rejects_timeout_below_poll_interval() {
        let config = DaemonConfig {
            stop_timeout_ms: 50,
            poll_interval_ms: 100,
            ..Default::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("stop_timeout_ms"));
    }

    #[test]
    fn test_daemon_config_pid_path_expands_tilde() {
        let config = DaemonConfig {
            pid_file: PathBuf::from("/run/relayctl/relay.pid"),
            ..Default::default()
        };
        assert_eq!(config.pid_path(), PathBuf::from("/run/relayctl/relay.pid"));

        let config = DaemonConfig {
            pid_file: PathBuf::from("~/relayctl/relay.pid"),
            ..Default::default()
        };
        let expanded = config.pid_path();
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("relayctl/relay.pid"));
    }

    #[test]
    fn test_daemon_config_from_toml() {
        let toml_str = r#"
            command = "xray"
            args = ["run", "-c", "/etc/xray/config.json"]
            stop_timeout_ms = 5000
        "#;
        let config: DaemonConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.command, "xray");
        assert_eq!(config.args.len(), 3);
        assert_eq!(config.stop_timeout_ms, 5000);
        assert_eq!(config.poll_interval_ms, 100);
    }
}
