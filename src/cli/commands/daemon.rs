//! Daemon management commands.
//!
//! Provides CLI commands for starting, stopping, and monitoring the
//! background daemon that periodically syncs the quote collection.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::process::Command;

use crate::daemon::{DaemonState, SyncState};

/// Daemon management subcommands.
#[derive(Subcommand)]
pub enum DaemonSubcommand {
    /// Start the background daemon.
    Start {
        /// Run in foreground (don't daemonize).
        #[arg(long)]
        foreground: bool,
    },

    /// Stop the running daemon.
    Stop,

    /// Show daemon status.
    Status,

    /// Show daemon logs.
    Logs {
        /// Number of lines to show.
        #[arg(short = 'n', long, default_value = "20")]
        lines: usize,

        /// Follow log output (like tail -f).
        #[arg(short, long)]
        follow: bool,
    },
}

/// Arguments for the daemon command.
#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    pub command: DaemonSubcommand,
}

/// Executes the daemon command.
pub fn run(args: Args) -> Result<()> {
    match args.command {
        DaemonSubcommand::Start { foreground } => run_start(foreground),
        DaemonSubcommand::Stop => run_stop(),
        DaemonSubcommand::Status => run_status(),
        DaemonSubcommand::Logs { lines, follow } => run_logs(lines, follow),
    }
}

/// Starts the daemon.
fn run_start(foreground: bool) -> Result<()> {
    let state = DaemonState::new()?;

    // Check if already running
    if state.is_running() {
        let pid = state.get_pid().unwrap_or(0);
        println!(
            "{} Daemon is already running (PID {})",
            "Warning:".yellow(),
            pid
        );
        return Ok(());
    }

    if foreground {
        println!("{}", "Starting daemon in foreground...".green());
        println!("{}", "Press Ctrl+C to stop".dimmed());
        println!();

        // Run the daemon in the current process
        let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

        rt.block_on(crate::daemon::run_daemon())?;
    } else {
        // Start the daemon as a background process
        println!("{}", "Starting daemon in background...".green());

        let current_exe =
            std::env::current_exe().context("Failed to get current executable path")?;

        // Spawn the daemon process with foreground flag
        let child = Command::new(&current_exe)
            .arg("daemon")
            .arg("start")
            .arg("--foreground")
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .context("Failed to spawn daemon process")?;

        println!(
            "{} Daemon started with PID {}",
            "Success:".green(),
            child.id()
        );
        println!(
            "{}",
            format!("Logs available at: {:?}", state.log_file).dimmed()
        );
    }

    Ok(())
}

/// Stops the running daemon.
fn run_stop() -> Result<()> {
    let state = DaemonState::new()?;

    if !state.is_running() {
        println!("{}", "Daemon is not running".yellow());
        return Ok(());
    }

    let pid = state.get_pid().unwrap_or(0);
    println!("Stopping daemon (PID {pid})...");

    kill_process(pid)?;

    // Wait for daemon to stop
    for i in 0..30 {
        std::thread::sleep(std::time::Duration::from_millis(100));
        if !state.is_running() {
            // Clean up any leftover files
            let _ = state.cleanup();
            println!("{}", "Daemon stopped".green());
            return Ok(());
        }
        if i == 10 {
            println!("{}", "Waiting for daemon to stop...".dimmed());
        }
    }

    println!("{}", "Warning: Daemon may still be running".yellow());

    Ok(())
}

/// Sends SIGTERM to a process.
fn kill_process(pid: u32) -> Result<()> {
    #[cfg(unix)]
    {
        unsafe {
            libc::kill(pid as libc::pid_t, libc::SIGTERM);
        }
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        anyhow::bail!("Killing processes not supported on this platform");
    }

    Ok(())
}

/// Shows the daemon status.
fn run_status() -> Result<()> {
    let state = DaemonState::new()?;

    if !state.is_running() {
        println!("{}", "Daemon is not running".yellow());
        return Ok(());
    }

    let pid = state.get_pid().unwrap_or(0);

    println!("{}", "Daemon Status".green().bold());
    println!();
    println!("  {} {}", "Status:".dimmed(), "running".green());
    println!("  {} {}", "PID:".dimmed(), pid);

    // Last/next cycle from the sync state file
    let sync_state = SyncState::load().unwrap_or_default();
    if let Some(last) = sync_state.last_sync_at {
        let outcome = match sync_state.last_sync_success {
            Some(true) => "ok".green(),
            Some(false) => "failed".red(),
            None => "unknown".dimmed(),
        };
        println!(
            "  {} {} ({})",
            "Last sync:".dimmed(),
            last.format("%Y-%m-%d %H:%M:%S UTC"),
            outcome
        );
    }
    if let Some(next) = sync_state.next_sync_at {
        println!(
            "  {} {}",
            "Next sync:".dimmed(),
            next.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    Ok(())
}

/// Shows daemon logs.
fn run_logs(lines: usize, follow: bool) -> Result<()> {
    let state = DaemonState::new()?;

    if !state.log_file.exists() {
        println!("{}", "No log file found".yellow());
        println!("{}", format!("Expected at: {:?}", state.log_file).dimmed());
        return Ok(());
    }

    if follow {
        // Follow mode - continuously read new lines
        println!("{}", format!("Following {:?}...", state.log_file).dimmed());
        println!("{}", "Press Ctrl+C to stop".dimmed());
        println!();

        let file = File::open(&state.log_file).context("Failed to open log file")?;
        let mut reader = BufReader::new(file);

        // Seek to end
        reader.seek(SeekFrom::End(0))?;

        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => {
                    // No new data, sleep briefly
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
                Ok(_) => {
                    print!("{line}");
                }
                Err(e) => {
                    tracing::debug!("Error reading log: {}", e);
                    break;
                }
            }
        }
    } else {
        // Show last N lines
        let file = File::open(&state.log_file).context("Failed to open log file")?;
        let reader = BufReader::new(file);

        let all_lines: Vec<String> = reader.lines().map_while(Result::ok).collect();

        let start = if all_lines.len() > lines {
            all_lines.len() - lines
        } else {
            0
        };

        for line in &all_lines[start..] {
            println!("{line}");
        }
    }

    Ok(())
}
