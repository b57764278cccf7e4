//! Daemon lifecycle management commands
//!
//! Implements `relayctl daemon start/stop/restart/status` for the external
//! proxy daemon. The daemon is tracked through its PID file; relayctl never
//! supervises it beyond spawn, signal, and bounded wait.

use crate::utils::pid;
use anyhow::{Context, Result};
use clap::Subcommand;
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use relayctl_config::{Config, DaemonConfig};
use std::fs::OpenOptions;
use std::process::{Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;

/// Poll intervals the spawned daemon must survive before start reports success
const STARTUP_CHECKS: u32 = 5;

/// Daemon subcommands
#[derive(Subcommand)]
pub enum DaemonAction {
    /// Start the proxy daemon in background
    Start,
    /// Stop the proxy daemon gracefully
    Stop,
    /// Restart the proxy daemon
    Restart,
    /// Check proxy daemon status
    Status,
}

/// Execute daemon subcommand
pub async fn run(config: &Config, action: DaemonAction) -> Result<()> {
    match action {
        DaemonAction::Start => start(config).await,
        DaemonAction::Stop => stop(&config.daemon).await,
        DaemonAction::Restart => restart(config).await,
        DaemonAction::Status => status(&config.daemon),
    }
}

/// Start the proxy daemon in background
///
/// Spawns the configured daemon command detached from the terminal and
/// records its PID. The PID file lock is held across the check-spawn-write
/// section so concurrent starts serialize instead of both spawning.
pub async fn start(config: &Config) -> Result<()> {
    let daemon_config = &config.daemon;
    let pid_path = daemon_config.pid_path();

    let mut pid_file = pid::open_locked(&pid_path)?;

    // A live PID in the file means a daemon we already manage
    if let Some(existing) = pid::read_pid(&pid_path)? {
        if pid::is_process_running(existing) {
            anyhow::bail!(
                "Daemon already running (PID: {}, PID file: {})",
                existing,
                pid_path.display()
            );
        }
    }

    println!("Starting proxy daemon...");

    // Capture the daemon's stdout/stderr for startup errors. Whatever the
    // daemon logs through its own config is its own concern.
    let (stdout_handle, stderr_handle) = if config.logging.file_logging_enabled {
        let log_path = config.logging.daemon_startup_log_path();

        relayctl_config::paths::ensure_parent_dir(&log_path)
            .context("Failed to create log directory")?;

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

        let log_file_stderr = log_file
            .try_clone()
            .context("Failed to clone log file handle")?;

        println!("  Startup log: {}", log_path.display());

        (Stdio::from(log_file), Stdio::from(log_file_stderr))
    } else {
        (Stdio::null(), Stdio::null())
    };

    // nohup detaches the daemon from the controlling terminal
    let mut child = Command::new("nohup")
        .arg(&daemon_config.command)
        .args(&daemon_config.args)
        .stdin(Stdio::null())
        .stdout(stdout_handle)
        .stderr(stderr_handle)
        .spawn()
        .with_context(|| format!("Failed to spawn daemon process: {}", daemon_config.command))?;

    let daemon_pid = child.id();
    pid::write_pid(&mut pid_file, daemon_pid)?;

    // Give the daemon a few poll intervals to crash on a bad config or a
    // missing binary before declaring success
    for _ in 0..STARTUP_CHECKS {
        sleep(Duration::from_millis(daemon_config.poll_interval_ms)).await;
        if let Some(status) = child
            .try_wait()
            .context("Failed to poll daemon process")?
        {
            pid::remove_pid_file(&pid_path)?;
            anyhow::bail!(
                "Daemon process exited during startup ({}). Check the startup log for errors.",
                status
            );
        }
    }

    println!("✓ Daemon started successfully (PID: {})", daemon_pid);
    println!("  PID file: {}", pid_path.display());
    Ok(())
}

/// Stop the proxy daemon gracefully
///
/// Sends SIGTERM once and polls for the process to disappear, up to
/// `stop_timeout_ms`. The PID file is removed only after the daemon is
/// confirmed gone; on timeout it stays in place for the next attempt.
pub async fn stop(daemon_config: &DaemonConfig) -> Result<()> {
    let pid_path = daemon_config.pid_path();

    let pid = match pid::read_pid(&pid_path)? {
        Some(pid) => pid,
        None => {
            println!("Daemon is not running");
            return Ok(());
        }
    };

    println!("Stopping proxy daemon (PID: {})...", pid);

    match kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        Ok(()) => {}
        // The process is already gone; the liveness wait below confirms it
        Err(Errno::ESRCH) => {}
        Err(e) => return Err(e).context("Failed to send SIGTERM to daemon"),
    }

    let attempts = (daemon_config.stop_timeout_ms / daemon_config.poll_interval_ms).max(1);
    for i in 0..attempts {
        if !pid::is_process_running(pid) {
            pid::remove_pid_file(&pid_path)?;
            println!("✓ Daemon stopped successfully");
            return Ok(());
        }

        if i > 0 && i % 10 == 0 {
            println!(
                "  Waiting for daemon to stop... ({} ms)",
                i * daemon_config.poll_interval_ms
            );
        }

        sleep(Duration::from_millis(daemon_config.poll_interval_ms)).await;
    }

    if !pid::is_process_running(pid) {
        pid::remove_pid_file(&pid_path)?;
        println!("✓ Daemon stopped successfully");
        return Ok(());
    }

    // The PID file stays so the failed stop remains visible to the next attempt
    anyhow::bail!(
        "Daemon (PID: {}) did not stop within {} ms; PID file kept: {}",
        pid,
        daemon_config.stop_timeout_ms,
        pid_path.display()
    )
}

/// Restart the proxy daemon
///
/// Stop tolerates a daemon that is not running, so restart doubles as
/// "make sure it is running with the current config".
pub async fn restart(config: &Config) -> Result<()> {
    println!("Restarting proxy daemon...");

    stop(&config.daemon).await?;
    sleep(Duration::from_millis(config.daemon.poll_interval_ms)).await;
    start(config).await?;

    println!("✓ Daemon restarted successfully");
    Ok(())
}

/// Check daemon status and print information
pub fn status(daemon_config: &DaemonConfig) -> Result<()> {
    let pid_path = daemon_config.pid_path();

    match pid::read_pid(&pid_path)? {
        Some(pid) if pid::is_process_running(pid) => {
            println!("✓ Daemon is running");
            println!("  PID: {}", pid);
            println!("  PID file: {}", pid_path.display());
        }
        Some(pid) => {
            println!("✗ Daemon is not running");
            println!(
                "  PID file is stale (PID {} is gone): {}",
                pid,
                pid_path.display()
            );
        }
        None => {
            println!("✗ Daemon is not running");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relayctl_config::LoggingConfig;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn test_daemon_config(pid_file: PathBuf) -> DaemonConfig {
        DaemonConfig {
            pid_file,
            stop_timeout_ms: 2_000,
            poll_interval_ms: 25,
            ..Default::default()
        }
    }

    fn spawn_child(program: &str, args: &[&str]) -> std::process::Child {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap()
    }

    fn write_pid_file(path: &Path, pid: u32) {
        std::fs::write(path, format!("{}\n", pid)).unwrap();
    }

    #[tokio::test]
    async fn test_stop_without_pid_file_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let config = test_daemon_config(temp.path().join("relay.pid"));

        stop(&config).await.unwrap();
        stop(&config).await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_tolerates_already_dead_process() {
        let temp = TempDir::new().unwrap();
        let pid_file = temp.path().join("relay.pid");
        let config = test_daemon_config(pid_file.clone());

        // Reap a short-lived child so its PID is known-dead
        let mut child = spawn_child("true", &[]);
        let dead_pid = child.id();
        child.wait().unwrap();
        write_pid_file(&pid_file, dead_pid);

        stop(&config).await.unwrap();
        assert!(!pid_file.exists(), "stale PID file must be cleaned up");
    }

    #[tokio::test]
    async fn test_stop_terminates_live_child() {
        let temp = TempDir::new().unwrap();
        let pid_file = temp.path().join("relay.pid");
        let config = test_daemon_config(pid_file.clone());

        let mut child = spawn_child("sleep", &["30"]);
        write_pid_file(&pid_file, child.id());

        // Reap as soon as SIGTERM lands so liveness polling sees it vanish
        let reaper = std::thread::spawn(move || {
            let _ = child.wait();
        });

        stop(&config).await.unwrap();

        assert!(!pid_file.exists());
        reaper.join().unwrap();
    }

    #[tokio::test]
    async fn test_stop_timeout_keeps_pid_file() {
        let temp = TempDir::new().unwrap();
        let pid_file = temp.path().join("relay.pid");
        let mut config = test_daemon_config(pid_file.clone());
        config.stop_timeout_ms = 200;
        config.poll_interval_ms = 50;

        // A child that ignores SIGTERM and outlives the stop timeout
        let mut child = spawn_child("sh", &["-c", "trap '' TERM; sleep 30"]);
        let child_pid = child.id();
        write_pid_file(&pid_file, child_pid);

        let result = stop(&config).await;

        assert!(result.is_err());
        assert!(pid_file.exists(), "a failed stop must not clean up");
        assert_eq!(pid::read_pid(&pid_file).unwrap(), Some(child_pid));

        let _ = kill(Pid::from_raw(child_pid as i32), Signal::SIGKILL);
        let _ = child.wait();
    }

    fn test_start_config(command: &str, args: &[&str], pid_file: PathBuf) -> Config {
        Config {
            daemon: DaemonConfig {
                command: command.to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
                pid_file,
                poll_interval_ms: 25,
                ..Default::default()
            },
            logging: LoggingConfig {
                file_logging_enabled: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_start_refuses_while_running() {
        let temp = TempDir::new().unwrap();
        let pid_file = temp.path().join("relay.pid");
        let config = test_start_config("sleep", &["30"], pid_file.clone());

        start(&config).await.unwrap();
        let pid = pid::read_pid(&pid_file).unwrap().unwrap();
        assert!(pid::is_process_running(pid));

        let second = start(&config).await;
        assert!(second.is_err());
        assert!(second
            .unwrap_err()
            .to_string()
            .contains("already running"));

        let _ = kill(Pid::from_raw(pid as i32), Signal::SIGKILL);
    }

    #[tokio::test]
    async fn test_start_reports_immediate_exit() {
        let temp = TempDir::new().unwrap();
        let pid_file = temp.path().join("relay.pid");
        let config = test_start_config("false", &[], pid_file.clone());

        let result = start(&config).await;

        assert!(result.is_err());
        assert!(
            !pid_file.exists(),
            "the PID of a dead daemon must not linger"
        );
    }
}
