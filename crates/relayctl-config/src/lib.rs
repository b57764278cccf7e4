//! Configuration types and loading for relayctl
//!
//! This crate provides:
//! - Configuration structures for the bridge, the management client, and
//!   the daemon lifecycle commands
//! - Config file loading (TOML format)
//! - The `RELAYCTL_API_KEY` environment override
//!
//! # Module Organization
//!
//! Configuration is split into logical modules:
//! - `bridge` - HTTP bridge listener settings
//! - `management` - Daemon gRPC management API settings
//! - `daemon` - Proxy daemon process settings
//! - `logging` - Log file settings
//!
//! # Usage
//!
//! ```rust,ignore
//! use relayctl_config::{load_config, resolve_config_path};
//!
//! let (path, _source) = resolve_config_path(None);
//! let config = load_config(&path)?;
//! println!("Bridge listens on {}", config.bridge.bind_addr());
//! ```

mod loader;

// Default constants for all configuration values
pub mod constants;

// Path utilities
pub mod paths;

// Config modules - organized by concern
mod bridge;
mod daemon;
mod logging;
mod management;

pub use bridge::BridgeConfig;
pub use daemon::DaemonConfig;
pub use loader::{
    load_config, load_config_from_str, write_default_config, ConfigError, DEFAULT_CONFIG,
};
pub use logging::LoggingConfig;
pub use management::ManagementConfig;
pub use paths::{resolve_config_path, DEFAULT_CONFIG_FILENAME};

use serde::{Deserialize, Serialize};

/// Root configuration for relayctl
///
/// Every section is optional in the TOML file; missing sections use their
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP bridge listener settings
    #[serde(default)]
    pub bridge: BridgeConfig,
    /// Daemon gRPC management API settings
    #[serde(default)]
    pub management: ManagementConfig,
    /// Proxy daemon process settings
    #[serde(default)]
    pub daemon: DaemonConfig,
    /// Log file settings
    #[serde(default)]
    pub logging: LoggingConfig,
}
