//! Background daemon for periodic quote sync.
//!
//! The daemon runs the reconciliation cycle on a fixed interval against
//! the configured remote endpoint. It provides:
//!
//! - A periodic sync timer with an in-flight guard (cycles never overlap)
//! - PID file management for `daemon start/stop/status`
//! - File logging to `~/.adage/daemon.log`
//! - Graceful shutdown handling
//!
//! # Usage
//!
//! The daemon is typically started via `adage daemon start` and stopped
//! via `adage daemon stop`. Use `adage daemon status` to check whether it
//! is running.

pub mod state;
pub mod sync;

use anyhow::Result;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::RwLock;
use tracing_appender::non_blocking::WorkerGuard;

pub use state::DaemonState;
pub use sync::{run_periodic_sync, SyncState};

/// Runs the daemon in the foreground.
///
/// This is the main entry point for the daemon. It:
/// 1. Checks if another instance is already running
/// 2. Sets up logging to a file
/// 3. Writes the PID file
/// 4. Starts the periodic sync timer
/// 5. Waits for a shutdown signal (SIGTERM/SIGINT)
/// 6. Cleans up state files on exit
///
/// # Errors
///
/// Returns an error if another daemon instance is already running or the
/// state files cannot be written.
pub async fn run_daemon() -> Result<()> {
    let state = DaemonState::new()?;

    // Check if already running
    if state.is_running() {
        anyhow::bail!(
            "Daemon is already running (PID {})",
            state.get_pid().unwrap_or(0)
        );
    }

    // Set up file logging
    let _guard = setup_logging(&state)?;

    tracing::info!("Starting Adage sync daemon...");

    // Write PID file
    let pid = std::process::id();
    state.write_pid(pid)?;
    tracing::info!("Daemon started with PID {}", pid);

    // Shared sync state, restored from the last run
    let sync_state = Arc::new(RwLock::new(SyncState::load().unwrap_or_default()));

    // Create shutdown channel
    let (broadcast_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    // Start the periodic sync timer
    let sync_handle = tokio::spawn(run_periodic_sync(
        sync_state.clone(),
        broadcast_tx.subscribe(),
    ));

    // Wait for shutdown signal
    wait_for_shutdown().await?;

    // Signal the sync loop to shut down; a cycle in flight is abandoned
    let _ = broadcast_tx.send(());

    // Give the loop time to notice
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    sync_handle.abort();

    // Clean up state files
    state.cleanup()?;

    tracing::info!("Daemon stopped");

    Ok(())
}

/// Blocks until SIGINT or SIGTERM arrives.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<()> {
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<()> {
    signal::ctrl_c().await?;
    tracing::info!("Received Ctrl+C, shutting down...");
    Ok(())
}

/// Sets up file logging for the daemon.
///
/// Configures tracing to write logs to `~/.adage/daemon.log`.
/// Returns a guard that must be kept alive for the duration of the daemon.
/// If a global subscriber is already set (e.g., from main.rs when running
/// in foreground mode), this will log to the existing subscriber.
fn setup_logging(state: &DaemonState) -> Result<WorkerGuard> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let file_appender = tracing_appender::rolling::never(
        state.log_file.parent().unwrap_or(std::path::Path::new(".")),
        state.log_file.file_name().unwrap_or_default(),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    // Use try_init to avoid panic if a subscriber is already set
    // (which happens when running in foreground from CLI)
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adage=info".into()),
        )
        .with(file_layer)
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daemon_state_paths() {
        // Just verify DaemonState can be created
        let state = DaemonState::new();
        assert!(state.is_ok(), "DaemonState creation should succeed");

        let state = state.unwrap();
        assert!(
            state.pid_file.to_string_lossy().contains("daemon.pid"),
            "PID file path should contain daemon.pid"
        );
        assert!(
            state.log_file.to_string_lossy().contains("daemon.log"),
            "Log file path should contain daemon.log"
        );
    }
}
