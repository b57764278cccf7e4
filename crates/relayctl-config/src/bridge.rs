//! HTTP bridge listener configuration

use crate::constants::{DEFAULT_BRIDGE_HOST, DEFAULT_BRIDGE_PORT};
use serde::{Deserialize, Serialize};

/// Configuration for the HTTP bridge listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Listen host (default: 127.0.0.1)
    #[serde(default = "default_bridge_host")]
    pub host: String,
    /// Listen port (default: 8765)
    #[serde(default = "default_bridge_port")]
    pub port: u16,
    /// Shared API key expected in the `api_key` query parameter.
    ///
    /// There is no usable default: `serve` refuses to start with an empty
    /// key, because a request without an `api_key` parameter would compare
    /// equal to an empty secret.
    #[serde(default)]
    pub api_key: String,
}

fn default_bridge_host() -> String {
    DEFAULT_BRIDGE_HOST.to_string()
}

fn default_bridge_port() -> u16 {
    DEFAULT_BRIDGE_PORT
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            host: default_bridge_host(),
            port: default_bridge_port(),
            api_key: String::new(),
        }
    }
}

impl BridgeConfig {
    /// Listener address in `host:port` form.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate structural configuration constraints.
    ///
    /// Returns a list of validation errors (empty if valid). The API key is
    /// checked separately by [`BridgeConfig::validate_api_key`] so that
    /// commands that never serve HTTP can load a keyless config.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.host.is_empty() {
            errors.push("bridge.host must not be empty".to_string());
        }
        if self.port == 0 {
            errors.push("bridge.port must not be 0".to_string());
        }

        errors
    }

    /// Validate that the shared API key is usable for serving.
    pub fn validate_api_key(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err(
                "bridge.api_key is empty; set it in the config file or via RELAYCTL_API_KEY"
                    .to_string(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_config_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8765);
        assert!(config.api_key.is_empty());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_bridge_config_bind_addr() {
        let config = BridgeConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            api_key: "secret".to_string(),
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_bridge_config_rejects_zero_port() {
        let config = BridgeConfig {
            port: 0,
            ..Default::default()
        };
        let errors = config.validate();
        assert!(!errors.is_empty());
        assert!(errors[0].contains("bridge.port"));
    }

    #[test]
    fn test_bridge_config_empty_api_key_fails_serve_validation() {
        let config = BridgeConfig::default();
        let err = config.validate_api_key().unwrap_err();
        assert!(err.contains("api_key"));

        let config = BridgeConfig {
            api_key: "secret".to_string(),
            ..Default::default()
        };
        assert!(config.validate_api_key().is_ok());
    }
}
