//! Periodic sync for the daemon.
//!
//! Drives the reconciliation cycle on a fixed interval. Cycles never
//! overlap: an atomic in-flight flag is taken before a cycle is dispatched
//! to the blocking worker, and a tick that fires while a cycle is still
//! outstanding is skipped.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::interval;

use crate::config::Config;
use crate::reconcile::{self, SyncOutcome};
use crate::remote::RemoteClient;
use crate::storage::QuoteStore;

/// Persistent record of sync scheduling and the last outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncState {
    /// When the last cycle ran (successfully or not).
    pub last_sync_at: Option<DateTime<Utc>>,
    /// When the next cycle is scheduled.
    pub next_sync_at: Option<DateTime<Utc>>,
    /// Remote records new to the collection in the last cycle.
    pub last_new_count: Option<u64>,
    /// Whether the last cycle replaced the collection.
    pub last_sync_success: Option<bool>,
}

impl SyncState {
    /// Returns the path to the sync state file.
    fn state_path() -> Result<PathBuf> {
        let adage_dir = dirs::home_dir()
            .context("Could not find home directory")?
            .join(".adage");
        Ok(adage_dir.join("sync_state.json"))
    }

    /// Loads the sync state from disk.
    ///
    /// Returns the default state if the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::state_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read sync state file")?;
        let state: SyncState =
            serde_json::from_str(&content).context("Failed to parse sync state file")?;
        Ok(state)
    }

    /// Saves the sync state to disk atomically.
    fn save(&self) -> Result<()> {
        let path = Self::state_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create state directory")?;
        }
        let content = serde_json::to_string_pretty(self)?;

        // Write to a temp file first, then rename for atomicity
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content).context("Failed to write sync state temp file")?;
        fs::rename(&temp_path, &path).context("Failed to rename sync state file")?;

        Ok(())
    }

    /// Updates the state with the next scheduled cycle and saves.
    pub fn schedule_next(&mut self, next_at: DateTime<Utc>) -> Result<()> {
        self.next_sync_at = Some(next_at);
        self.save()
    }

    /// Records a cycle outcome and saves.
    ///
    /// `next_at` is `None` for one-shot CLI syncs, which leave the daemon's
    /// schedule alone.
    pub fn record_sync(
        &mut self,
        outcome: &SyncOutcome,
        next_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.last_sync_at = Some(Utc::now());
        self.last_sync_success = Some(outcome.is_success());
        self.last_new_count = Some(outcome.new_count() as u64);
        if let Some(next) = next_at {
            self.next_sync_at = Some(next);
        }
        self.save()
    }
}

/// Shared sync state for the daemon.
pub type SharedSyncState = Arc<RwLock<SyncState>>;

/// Runs the periodic sync timer.
///
/// This function runs until the shutdown signal is received. Each tick
/// dispatches one reconciliation cycle to a blocking worker, unless the
/// previous cycle is still in flight, in which case the tick is skipped.
pub async fn run_periodic_sync(
    sync_state: SharedSyncState,
    mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) {
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Could not load config, using defaults: {e}");
        Config::default()
    });

    let cycle_interval = config.sync_interval();
    let cycle_secs = cycle_interval.as_secs() as i64;

    // Initialize state with next sync time
    {
        let mut state = sync_state.write().await;
        let next_sync = Utc::now() + chrono::Duration::seconds(cycle_secs);
        if let Err(e) = state.schedule_next(next_sync) {
            tracing::warn!("Failed to save initial sync state: {e}");
        } else {
            tracing::info!(
                "Periodic sync every {}s against {}",
                cycle_interval.as_secs(),
                config.remote_url
            );
        }
    }

    let mut tick = interval(cycle_interval);
    let in_flight = Arc::new(AtomicBool::new(false));

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if in_flight
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
                {
                    tracing::debug!("Previous cycle still in flight, skipping tick");
                    continue;
                }

                let in_flight = in_flight.clone();
                let sync_state = sync_state.clone();
                let config = config.clone();
                tokio::spawn(async move {
                    let result =
                        tokio::task::spawn_blocking(move || perform_sync(&config)).await;

                    let outcome = match result {
                        Ok(Ok(outcome)) => outcome,
                        Ok(Err(e)) => {
                            tracing::warn!("Sync cycle error: {e}");
                            SyncOutcome::NoServerData
                        }
                        Err(e) => {
                            tracing::warn!("Sync cycle task failed: {e}");
                            SyncOutcome::NoServerData
                        }
                    };

                    match &outcome {
                        SyncOutcome::Synced { new_from_server, total } => {
                            tracing::info!(
                                "Synced, {new_from_server} new items from server ({total} total)"
                            );
                        }
                        SyncOutcome::NoServerData => {
                            tracing::info!("Sync failed — no server data");
                        }
                    }

                    let next_sync = Utc::now() + chrono::Duration::seconds(cycle_secs);
                    let mut state = sync_state.write().await;
                    if let Err(e) = state.record_sync(&outcome, Some(next_sync)) {
                        tracing::warn!("Failed to save sync state: {e}");
                    }

                    in_flight.store(false, Ordering::SeqCst);
                });
            }
            _ = shutdown_rx.recv() => {
                tracing::info!("Periodic sync shutting down");
                break;
            }
        }
    }
}

/// Performs one reconciliation cycle against the configured remote.
///
/// Blocking; the daemon runs this on a worker thread, the CLI `sync`
/// command calls it directly.
pub fn perform_sync(config: &Config) -> Result<SyncOutcome> {
    let mut store = QuoteStore::open_default().context("Could not open quote store")?;
    let client = RemoteClient::with_url(&config.remote_url);
    Ok(reconcile::run_cycle(&mut store, &client, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_state_default() {
        let state = SyncState::default();
        assert!(state.last_sync_at.is_none());
        assert!(state.next_sync_at.is_none());
        assert!(state.last_new_count.is_none());
        assert!(state.last_sync_success.is_none());
    }

    #[test]
    fn test_sync_state_serialization() {
        let state = SyncState {
            last_sync_at: Some(Utc::now()),
            next_sync_at: Some(Utc::now() + chrono::Duration::seconds(30)),
            last_new_count: Some(4),
            last_sync_success: Some(true),
        };

        let json = serde_json::to_string(&state).unwrap();
        let parsed: SyncState = serde_json::from_str(&json).unwrap();

        assert!(parsed.last_sync_at.is_some());
        assert!(parsed.next_sync_at.is_some());
        assert_eq!(parsed.last_new_count, Some(4));
        assert_eq!(parsed.last_sync_success, Some(true));
    }
}
