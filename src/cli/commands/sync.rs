//! Sync command - run one reconciliation cycle in the foreground.

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::daemon::sync::{perform_sync, SyncState};
use crate::reconcile::SyncOutcome;

/// Arguments for the sync command.
#[derive(clap::Args)]
pub struct Args {}

/// Executes the sync command.
///
/// Runs fetch → merge → persist once and prints the outcome. The result
/// is recorded in the sync state file so `adage status` reflects manual
/// syncs too; the daemon's schedule is left alone.
pub fn run(_args: Args) -> Result<()> {
    let config = Config::load()?;

    println!(
        "{}",
        format!("Syncing with {}...", config.remote_url).dimmed()
    );

    let outcome = perform_sync(&config)?;

    let mut state = SyncState::load().unwrap_or_default();
    if let Err(e) = state.record_sync(&outcome, None) {
        tracing::warn!("Failed to save sync state: {e}");
    }

    match outcome {
        SyncOutcome::Synced { new_from_server, total } => {
            println!(
                "{}",
                format!("Synced, {new_from_server} new items from server ({total} quotes).")
                    .green()
            );
        }
        SyncOutcome::NoServerData => {
            println!("{}", "Sync failed — no server data.".yellow());
        }
    }

    Ok(())
}
