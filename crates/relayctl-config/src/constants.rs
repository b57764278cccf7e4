//! Default constants for relayctl configuration
//!
//! Centralizes the default values used throughout the codebase so that
//! everything configurable has a single source of truth.

// ============================================================================
// HOSTS
// ============================================================================

/// Default host for the HTTP bridge listener (localhost only for security)
pub const DEFAULT_BRIDGE_HOST: &str = "127.0.0.1";

/// Default host of the daemon's management API
pub const DEFAULT_MANAGEMENT_HOST: &str = "127.0.0.1";

// ============================================================================
// PORTS
// ============================================================================

/// Default port for the HTTP bridge listener
pub const DEFAULT_BRIDGE_PORT: u16 = 8765;

/// Default port of the daemon's gRPC management API
pub const DEFAULT_MANAGEMENT_PORT: u16 = 10085;

// ============================================================================
// ENVIRONMENT VARIABLES
// ============================================================================

/// Config file path override
pub const ENV_RELAYCTL_CONFIG: &str = "RELAYCTL_CONFIG";

/// relayctl home directory override
pub const ENV_RELAYCTL_HOME: &str = "RELAYCTL_HOME";

/// Shared API key override (takes precedence over the config file)
pub const ENV_RELAYCTL_API_KEY: &str = "RELAYCTL_API_KEY";

// ============================================================================
// TIMEOUTS (milliseconds)
// ============================================================================

/// Management channel establishment timeout
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Maximum time `daemon stop` waits for the daemon to exit after SIGTERM
pub const DEFAULT_STOP_TIMEOUT_MS: u64 = 10_000;

// ============================================================================
// INTERVALS (milliseconds)
// ============================================================================

/// Poll interval for daemon startup/shutdown liveness checks
pub const DEFAULT_DAEMON_POLL_INTERVAL_MS: u64 = 100;

// ============================================================================
// RETENTION
// ============================================================================

/// Log file retention in days (rotated bridge logs older than this are
/// deleted at serve startup; 0 disables the cleanup)
pub const DEFAULT_LOG_RETENTION_DAYS: u32 = 7;
