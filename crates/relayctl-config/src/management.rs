//! Daemon management API (gRPC) configuration

use crate::constants::{DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_MANAGEMENT_HOST, DEFAULT_MANAGEMENT_PORT};
use serde::{Deserialize, Serialize};

/// Connection settings for the proxy daemon's gRPC management API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagementConfig {
    /// Management API host (default: 127.0.0.1)
    #[serde(default = "default_management_host")]
    pub host: String,
    /// Management API port (default: 10085)
    #[serde(default = "default_management_port")]
    pub port: u16,
    /// Connect timeout in milliseconds (default: 10000)
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_management_host() -> String {
    DEFAULT_MANAGEMENT_HOST.to_string()
}

fn default_management_port() -> u16 {
    DEFAULT_MANAGEMENT_PORT
}

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

impl Default for ManagementConfig {
    fn default() -> Self {
        ManagementConfig {
            host: default_management_host(),
            port: default_management_port(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl ManagementConfig {
    /// Endpoint URL for the gRPC channel.
    ///
    /// The management API is plaintext HTTP/2; TLS is not supported by the
    /// daemon on this port.
    pub fn endpoint_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Validate configuration, returning a list of errors (empty if valid)
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.host.is_empty() {
            errors.push("management.host must not be empty".to_string());
        }
        if self.port == 0 {
            errors.push("management.port must not be 0".to_string());
        }
        if self.connect_timeout_ms == 0 {
            errors.push("management.connect_timeout_ms must be greater than 0".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_management_config_defaults() {
        let config = ManagementConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 10085);
        assert_eq!(config.connect_timeout_ms, 10_000);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_management_config_endpoint_url() {
        let config = ManagementConfig {
            host: "10.0.0.5".to_string(),
            port: 2080,
            ..Default::default()
        };
        assert_eq!(config.endpoint_url(), "http://10.0.0.5:2080");
    }

    #[test]
    fn test_management_config_rejects_zero_timeout() {
        let config = ManagementConfig {
            connect_timeout_ms: 0,
            ..Default::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("connect_timeout_ms"));
    }
}
