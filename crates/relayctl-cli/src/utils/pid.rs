//! PID file helpers for the external proxy daemon
//!
//! The PID file records the relay daemon's process id, not relayctl's own.
//! It is written after a successful spawn and removed only once a stop has
//! been confirmed, so a failed stop leaves the file in place for the next
//! attempt.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

/// Read the daemon PID from the file.
///
/// A missing or empty file means no daemon is tracked and is not an error
/// (`open_locked` leaves an empty file behind when a start aborts early).
/// Anything else must be a strictly positive `pid_t`: `kill(2)` assigns
/// broadcast meanings to zero and negative PIDs, so out-of-range content is
/// an error, never "not running".
pub fn read_pid(path: &Path) -> Result<Option<u32>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read PID file: {}", path.display()))
        }
    };

    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let pid = trimmed
        .parse::<i32>()
        .ok()
        .filter(|&pid| pid > 0)
        .with_context(|| format!("PID file {} does not contain a valid PID", path.display()))?;
    Ok(Some(pid as u32))
}

/// Open the PID file and take an exclusive advisory lock.
///
/// The lock serializes concurrent `daemon start` invocations. It is held
/// only while the caller checks, spawns, and records the new PID, and is
/// released when the returned handle drops.
pub fn open_locked(path: &Path) -> Result<File> {
    relayctl_config::paths::ensure_parent_dir(path)
        .context("Failed to create PID file directory")?;

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("Failed to open PID file: {}", path.display()))?;

    file.try_lock_exclusive().with_context(|| {
        format!(
            "Another relayctl holds the PID file lock: {}",
            path.display()
        )
    })?;

    Ok(file)
}

/// Write a PID into an already-open PID file.
///
/// Write-then-truncate order: readers never observe an empty file, only the
/// complete old content or the complete new content.
pub fn write_pid(file: &mut File, pid: u32) -> Result<()> {
    let mut content = pid.to_string();
    content.push('\n');

    file.seek(SeekFrom::Start(0))
        .context("Failed to seek PID file")?;
    file.write_all(content.as_bytes())
        .context("Failed to write PID to file")?;
    file.set_len(content.len() as u64)
        .context("Failed to truncate PID file")?;
    file.sync_all().context("Failed to sync PID file")?;

    Ok(())
}

/// Remove the PID file. A file that is already gone is not an error.
pub fn remove_pid_file(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to remove PID file: {}", path.display()))
        }
    }
}

/// Check whether a process with the given PID exists.
///
/// Signal 0 probes for existence without delivering anything. This does not
/// distinguish "exists but owned by another user" from "running"; for a
/// daemon we manage ourselves EPERM does not arise.
pub fn is_process_running(pid: u32) -> bool {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    if pid == 0 {
        return false;
    }
    kill(Pid::from_raw(pid as i32), None).is_ok()
}
