//! Status command - show current Adage state.
//!
//! Displays an overview of the quote collection, the last sync outcome,
//! and whether the background daemon is running.

use anyhow::Result;
use colored::Colorize;

use crate::daemon::{DaemonState, SyncState};
use crate::storage::{default_db_path, QuoteStore};

/// Executes the status command.
///
/// Shows collection statistics, the last sync outcome, and daemon
/// liveness.
pub fn run() -> Result<()> {
    println!("{}", "Adage".bold().cyan());
    println!("{}", "Quote collection with remote sync".dimmed());
    println!();

    let store = QuoteStore::open_default()?;

    println!("{}", "Collection:".bold());
    println!("  Quotes:     {}", store.len());
    println!("  Categories: {}", store.categories().len());
    println!("  Filter:     {}", store.selected_category());
    println!("  Database:   {}", default_db_path()?.display());

    let sync_state = SyncState::load().unwrap_or_default();
    println!();
    println!("{}", "Sync:".bold());
    match sync_state.last_sync_at {
        Some(at) => {
            let outcome = match sync_state.last_sync_success {
                Some(true) => "ok".green(),
                Some(false) => "failed".red(),
                None => "unknown".dimmed(),
            };
            println!("  Last sync:  {} ({})", ago_string(at), outcome);
            if let Some(count) = sync_state.last_new_count {
                println!("  New items:  {count}");
            }
            if let Some(next) = sync_state.next_sync_at {
                println!(
                    "  Next sync:  {}",
                    next.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
        }
        None => println!("  {}", "Never synced".dimmed()),
    }

    let daemon = DaemonState::new()?;
    println!();
    println!("{}", "Daemon:".bold());
    if daemon.is_running() {
        println!(
            "  {} (PID {})",
            "running".green(),
            daemon.get_pid().unwrap_or(0)
        );
    } else {
        println!("  {}", "not running".dimmed());
        println!();
        println!(
            "{}",
            "Hint: Run 'adage daemon start' to sync periodically".yellow()
        );
    }

    Ok(())
}

/// Formats how long ago a timestamp was, coarsely.
fn ago_string(at: chrono::DateTime<chrono::Utc>) -> String {
    let minutes = chrono::Utc::now().signed_duration_since(at).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} minutes ago")
    } else if minutes < 1440 {
        format!("{} hours ago", minutes / 60)
    } else {
        format!("{} days ago", minutes / 1440)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_ago_string_just_now() {
        assert_eq!(ago_string(Utc::now()), "just now");
    }

    #[test]
    fn test_ago_string_minutes() {
        let at = Utc::now() - chrono::Duration::minutes(5);
        assert_eq!(ago_string(at), "5 minutes ago");
    }

    #[test]
    fn test_ago_string_hours() {
        let at = Utc::now() - chrono::Duration::hours(3);
        assert_eq!(ago_string(at), "3 hours ago");
    }

    #[test]
    fn test_ago_string_days() {
        let at = Utc::now() - chrono::Duration::days(2);
        assert_eq!(ago_string(at), "2 days ago");
    }
}
