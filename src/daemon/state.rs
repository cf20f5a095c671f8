//! Daemon state management.
//!
//! Manages the daemon's runtime state including PID file and log file
//! locations. Provides methods for checking if the daemon is running and
//! managing its lifecycle.

use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Manages daemon state including paths for the PID file and logs.
///
/// The daemon uses files in `~/.adage/` to coordinate between the running
/// daemon process and CLI commands that interact with it.
pub struct DaemonState {
    /// Path to the PID file (`~/.adage/daemon.pid`).
    pub pid_file: PathBuf,
    /// Path to the log file (`~/.adage/daemon.log`).
    pub log_file: PathBuf,
}

impl DaemonState {
    /// Creates a new DaemonState with default paths in `~/.adage/`.
    ///
    /// Creates the `~/.adage/` directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or
    /// if the `.adage` directory cannot be created.
    pub fn new() -> Result<Self> {
        let adage_dir = dirs::home_dir()
            .context("Could not find home directory")?
            .join(".adage");

        fs::create_dir_all(&adage_dir).context("Failed to create ~/.adage directory")?;

        Ok(Self {
            pid_file: adage_dir.join("daemon.pid"),
            log_file: adage_dir.join("daemon.log"),
        })
    }

    /// Checks if the daemon is currently running.
    ///
    /// Returns true if a PID file exists and the process with that PID
    /// is still alive. Returns false if no PID file exists, the PID file
    /// cannot be read, or the process is no longer running.
    pub fn is_running(&self) -> bool {
        match self.get_pid() {
            Some(pid) => Self::process_exists(pid),
            None => false,
        }
    }

    /// Gets the PID of the running daemon, if available.
    ///
    /// Returns `None` if the PID file does not exist or cannot be parsed.
    pub fn get_pid(&self) -> Option<u32> {
        if !self.pid_file.exists() {
            return None;
        }

        let mut file = fs::File::open(&self.pid_file).ok()?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).ok()?;

        contents.trim().parse().ok()
    }

    /// Writes the current process ID to the PID file.
    ///
    /// # Errors
    ///
    /// Returns an error if the PID file cannot be created or written to.
    pub fn write_pid(&self, pid: u32) -> Result<()> {
        let mut file = fs::File::create(&self.pid_file).context("Failed to create PID file")?;
        write!(file, "{pid}").context("Failed to write PID")?;
        Ok(())
    }

    /// Removes the PID file.
    ///
    /// Does not return an error if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove_pid(&self) -> Result<()> {
        if self.pid_file.exists() {
            fs::remove_file(&self.pid_file).context("Failed to remove PID file")?;
        }
        Ok(())
    }

    /// Cleans up daemon state files. Called during graceful shutdown.
    pub fn cleanup(&self) -> Result<()> {
        self.remove_pid()?;
        Ok(())
    }

    /// Checks if a process with the given PID exists.
    ///
    /// Uses the `kill(pid, 0)` system call which checks for process
    /// existence without sending a signal.
    fn process_exists(pid: u32) -> bool {
        #[cfg(unix)]
        {
            // SAFETY: kill(pid, 0) is a safe system call that only checks
            // if a process exists without sending any signal.
            unsafe { libc::kill(pid as libc::pid_t, 0) == 0 }
        }

        #[cfg(not(unix))]
        {
            // On Windows, we would need a different approach
            // For now, assume process exists if PID file exists
            let _ = pid;
            true
        }
    }
}
