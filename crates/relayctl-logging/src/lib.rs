//! Centralized logging configuration for relayctl
//!
//! This crate provides a unified logging initialization API for the relayctl
//! binary. It wraps `tracing` and `tracing-subscriber` to ensure consistent
//! logging behavior across commands.
//!
//! # Usage
//!
//! ```rust,ignore
//! use relayctl_logging::{init, init_with_file, LogConfig};
//! use std::path::Path;
//!
//! // CLI with debug flag
//! init(LogConfig::cli(false));
//!
//! // File logging (bridge running in the background)
//! let _guard = init_with_file(
//!     LogConfig::daemon(false),
//!     Path::new("/var/log/relayctl/relayctl_bridge.log"),
//! )?;
//! // Guard must be held for the duration of the program
//! ```
//!
//! # Re-exports
//!
//! This crate re-exports commonly used tracing macros for convenience:
//! - `trace!`, `debug!`, `info!`, `warn!`, `error!`
//! - `span!`, `Level`
//! - `instrument` attribute macro

use std::io::IsTerminal;
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for standardized imports
pub use tracing::{debug, error, info, span, trace, warn, Level};

// Re-export instrument attribute for function instrumentation
pub use tracing::instrument;

// Re-export WorkerGuard for file logging lifetime management
pub use tracing_appender::non_blocking::WorkerGuard;

/// Output destination for logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogOutput {
    /// Write logs to stdout (default)
    #[default]
    Stdout,
    /// Write logs to stderr
    Stderr,
    /// Write logs to a file (bridge background mode)
    File,
}

/// Timestamp format for log output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// Use local timezone (default)
    #[default]
    Local,
    /// Use UTC timezone
    Utc,
}

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Enable debug-level logging (overrides default_level)
    pub debug: bool,
    /// Default log level when RUST_LOG is not set
    pub default_level: String,
    /// Output destination
    pub output: LogOutput,
    /// Show module target in log output
    pub show_target: bool,
    /// Timestamp format (local or UTC)
    pub timestamp_format: TimestampFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            default_level: "info".to_string(),
            output: LogOutput::Stdout,
            show_target: false,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LogConfig {
    /// Create a new LogConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug-level logging
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Set the default log level (used when RUST_LOG is not set)
    pub fn default_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = level.into();
        self
    }

    /// Set the output destination
    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Show or hide module target in log output
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Set timestamp format (local or UTC)
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Use UTC timestamps
    pub fn utc(self) -> Self {
        self.timestamp_format(TimestampFormat::Utc)
    }

    /// Convenience: Configure for CLI usage
    pub fn cli(debug: bool) -> Self {
        Self::new().debug(debug)
    }

    /// Convenience: Configure for background bridge usage (logs to file)
    pub fn daemon(debug: bool) -> Self {
        Self::new().debug(debug).output(LogOutput::File)
    }

    /// Convenience: Configure for tests
    pub fn test() -> Self {
        Self::new().default_level("debug")
    }

    fn build_filter(&self) -> EnvFilter {
        if self.debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&self.default_level))
        }
    }
}

/// Initialize the logging system with the given configuration.
///
/// This function should be called once at application startup.
/// It configures `tracing-subscriber` based on the provided `LogConfig`.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Override log level (e.g., `RUST_LOG=debug` or `RUST_LOG=relayctl_bridge=trace`)
///
/// # Panics
///
/// Panics if called more than once (tracing can only be initialized once).
///
/// # Note
///
/// For file logging, use `init_with_file` instead.
pub fn init(config: LogConfig) {
    use tracing_subscriber::fmt::time::{LocalTime, UtcTime};

    let filter = config.build_filter();

    // Helper macro to apply timer and init (avoids type-level branching duplication)
    macro_rules! with_timer_init {
        ($builder:expr, $ts_format:expr) => {
            match $ts_format {
                TimestampFormat::Utc => $builder.with_timer(UtcTime::rfc_3339()).init(),
                TimestampFormat::Local => $builder.with_timer(LocalTime::rfc_3339()).init(),
            }
        };
    }

    match config.output {
        LogOutput::Stdout => {
            let is_tty = std::io::stdout().is_terminal();
            let builder = fmt()
                .with_env_filter(filter)
                .with_target(config.show_target)
                .with_ansi(is_tty);
            with_timer_init!(builder, config.timestamp_format);
        }
        LogOutput::Stderr | LogOutput::File => {
            // File output without path falls back to stderr; use init_with_file() for proper file logging
            let is_tty = std::io::stderr().is_terminal();
            let builder = fmt()
                .with_env_filter(filter)
                .with_target(config.show_target)
                .with_writer(std::io::stderr)
                .with_ansi(is_tty);
            with_timer_init!(builder, config.timestamp_format);
        }
    }
}

/// Initialize the logging system with file output.
///
/// This function sets up non-blocking file logging using `tracing-appender`
/// with daily rotation. The returned `WorkerGuard` must be held for the
/// duration of the program to ensure all logs are flushed before shutdown.
///
/// # Arguments
///
/// * `config` - Logging configuration
/// * `log_path` - Path to the log file (parent directory will be created if needed)
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created.
///
/// # Panics
///
/// Panics if called more than once (tracing can only be initialized once).
pub fn init_with_file(config: LogConfig, log_path: &Path) -> std::io::Result<WorkerGuard> {
    use tracing_subscriber::fmt::time::{LocalTime, UtcTime};

    let filter = config.build_filter();

    // Ensure parent directory exists
    relayctl_config::paths::ensure_parent_dir(log_path)
        .map_err(|e| std::io::Error::other(format!("Failed to create log directory: {}", e)))?;

    let log_dir = log_path.parent().unwrap_or(Path::new("."));
    let log_filename = log_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("relayctl.log");

    // Create file appender with daily rotation
    // Files named: {prefix}.YYYY-MM-DD (e.g., relayctl_bridge.log.2026-08-21)
    let file_appender = tracing_appender::rolling::daily(log_dir, log_filename);

    // Create non-blocking writer with dedicated thread
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors for file output
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(config.show_target)
        .with_writer(non_blocking)
        .with_ansi(false);

    match config.timestamp_format {
        TimestampFormat::Utc => builder.with_timer(UtcTime::rfc_3339()).init(),
        TimestampFormat::Local => builder.with_timer(LocalTime::rfc_3339()).init(),
    }

    Ok(guard)
}

/// Initialize logging for tests.
///
/// Uses `with_test_writer()` to capture logs in test output.
/// Safe to call multiple times (uses `try_init` internally).
pub fn init_test() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
}

/// Clean up rotated log files based on retention policy.
///
/// Deletes files named `{log_file}.*` (the daily-rotated output of
/// [`init_with_file`]) from `log_dir` when they are older than
/// `retention_days`.
///
/// # Arguments
///
/// * `log_dir` - Directory containing log files
/// * `log_file` - Base name of the rotated log (e.g., "relayctl_bridge.log")
/// * `retention_days` - Delete files older than this many days (0 = disabled)
///
/// # Returns
///
/// Number of files deleted, or error if directory cannot be read.
pub fn cleanup_old_logs(log_dir: &Path, log_file: &str, retention_days: u32) -> std::io::Result<usize> {
    use std::time::{Duration, SystemTime};

    if retention_days == 0 {
        return Ok(0); // Cleanup disabled
    }

    let cutoff = SystemTime::now() - Duration::from_secs(u64::from(retention_days) * 24 * 60 * 60);
    let rotated_prefix = format!("{}.", log_file);
    let mut deleted = 0;

    let entries = match std::fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // Directory doesn't exist yet, nothing to clean
            return Ok(0);
        }
        Err(e) => return Err(e),
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        // Match rotated logs only (relayctl_bridge.log.2026-08-14); the
        // current day's file is also date-suffixed but stays under the cutoff
        if !file_name.starts_with(&rotated_prefix) {
            continue;
        }

        if let Ok(metadata) = entry.metadata() {
            if let Ok(modified) = metadata.modified() {
                if modified < cutoff {
                    if let Err(e) = std::fs::remove_file(&path) {
                        warn!("Failed to delete old log file {:?}: {}", path, e);
                    } else {
                        info!("Deleted old log file: {:?}", path);
                        deleted += 1;
                    }
                }
            }
        }
    }

    Ok(deleted)
}
