//! Sync reconciliation between the local collection and the remote endpoint.
//!
//! One reconciliation cycle is fetch → merge → persist → report. The merge
//! policy is fixed: union by lowercased text, remote wins unconditionally on
//! a collision. There is no versioning, no causality tracking, and no
//! conflict metadata; presence or absence of the same text is the entire
//! policy.

use crate::config::Config;
use crate::remote::{RemoteClient, RemoteRecord};
use crate::storage::{Quote, QuoteStore, SERVER_CATEGORY};

/// Outcome of one reconciliation cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The merged collection replaced the store and was persisted.
    Synced {
        /// Remote records whose text had no local counterpart.
        new_from_server: usize,
        /// Size of the merged collection.
        total: usize,
    },
    /// No usable server data this cycle; the local collection is untouched.
    NoServerData,
}

impl SyncOutcome {
    /// Whether the cycle replaced the collection.
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Synced { .. })
    }

    /// Remote records that were new to the collection (0 on failure).
    pub fn new_count(&self) -> usize {
        match self {
            SyncOutcome::Synced { new_from_server, .. } => *new_from_server,
            SyncOutcome::NoServerData => 0,
        }
    }
}

/// Result of merging a remote batch into the local collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    /// The merged collection: remote records first, then surviving locals.
    pub merged: Vec<Quote>,
    /// Remote records whose text was not already present locally.
    pub new_from_server: usize,
}

/// Maps a remote batch into the local quote shape.
///
/// Remote records carry no category, so each is tagged with the fixed
/// "Server" sentinel. Records without a usable title are dropped.
pub fn map_remote(records: Vec<RemoteRecord>) -> Vec<Quote> {
    records
        .into_iter()
        .filter_map(|record| {
            let title = record.title?;
            if title.trim().is_empty() {
                return None;
            }
            Some(Quote::new(&title, SERVER_CATEGORY))
        })
        .collect()
}

/// Merges a remote batch into the local collection.
///
/// The result takes all remote records first, in remote order, then every
/// local record whose lowercased text does not appear among the remote
/// records, in original local order. On a text collision the remote version
/// wins and the local one is discarded. Duplicate texts within the remote
/// batch itself are kept as-is; dedup happens only between remote and local.
pub fn merge_remote(local: &[Quote], remote: Vec<Quote>) -> MergeResult {
    let local_keys: std::collections::HashSet<String> =
        local.iter().map(Quote::dedup_key).collect();
    let remote_keys: std::collections::HashSet<String> =
        remote.iter().map(Quote::dedup_key).collect();

    let new_from_server = remote
        .iter()
        .filter(|q| !local_keys.contains(&q.dedup_key()))
        .count();

    let mut merged = remote;
    merged.extend(
        local
            .iter()
            .filter(|q| !remote_keys.contains(&q.dedup_key()))
            .cloned(),
    );

    MergeResult { merged, new_from_server }
}

/// Runs one reconciliation cycle against the configured remote endpoint.
///
/// Fetch failures and empty batches are never propagated as errors; the
/// cycle simply reports `NoServerData` and leaves the store alone. After a
/// successful merge the collection is optionally pushed back, best-effort.
pub fn run_cycle(store: &mut QuoteStore, client: &RemoteClient, config: &Config) -> SyncOutcome {
    let records = match client.fetch(config.fetch_limit) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Sync fetch failed: {e}");
            return SyncOutcome::NoServerData;
        }
    };

    let remote = map_remote(records);
    if remote.is_empty() {
        tracing::debug!("Remote batch empty, skipping reconciliation");
        return SyncOutcome::NoServerData;
    }

    let MergeResult { merged, new_from_server } = merge_remote(store.quotes(), remote);
    let total = merged.len();

    if let Err(e) = store.replace_all(merged) {
        // Unreachable with a non-empty remote batch, but never fatal.
        tracing::warn!("Merged collection rejected: {e}");
        return SyncOutcome::NoServerData;
    }

    if config.push_back {
        if let Err(e) = client.push(store.quotes()) {
            tracing::warn!("Best-effort write-back failed: {e}");
        }
    }

    SyncOutcome::Synced { new_from_server, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(text: &str, category: &str) -> Quote {
        Quote::new(text, category)
    }

    #[test]
    fn test_map_remote_tags_server_category() {
        let records = vec![
            RemoteRecord { title: Some("from the wire".to_string()) },
            RemoteRecord { title: None },
            RemoteRecord { title: Some("  ".to_string()) },
        ];

        let quotes = map_remote(records);

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].text, "from the wire");
        assert_eq!(quotes[0].category, SERVER_CATEGORY);
    }

    #[test]
    fn test_merge_empty_remote_is_identity() {
        let local = vec![quote("a", "x"), quote("b", "y")];

        let result = merge_remote(&local, Vec::new());

        assert_eq!(result.merged, local);
        assert_eq!(result.new_from_server, 0);
    }

    #[test]
    fn test_merge_remote_wins_on_case_insensitive_collision() {
        let local = vec![quote("A", "x")];
        let remote = vec![quote("a", SERVER_CATEGORY)];

        let result = merge_remote(&local, remote);

        assert_eq!(result.merged.len(), 1);
        assert_eq!(result.merged[0].text, "a");
        assert_eq!(result.merged[0].category, SERVER_CATEGORY);
        assert_eq!(result.new_from_server, 0, "Colliding text is not new");
    }

    #[test]
    fn test_merge_preserves_unmatched_locals_in_order() {
        let local = vec![quote("keep one", "x"), quote("shared", "x"), quote("keep two", "y")];
        let remote = vec![quote("SHARED", SERVER_CATEGORY), quote("brand new", SERVER_CATEGORY)];

        let result = merge_remote(&local, remote);

        let texts: Vec<&str> = result.merged.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["SHARED", "brand new", "keep one", "keep two"]);
        assert_eq!(result.new_from_server, 1);
    }

    #[test]
    fn test_merge_remote_records_come_first() {
        let local = vec![quote("local", "x")];
        let remote = vec![quote("r1", SERVER_CATEGORY), quote("r2", SERVER_CATEGORY)];

        let result = merge_remote(&local, remote);

        assert_eq!(result.merged[0].text, "r1");
        assert_eq!(result.merged[1].text, "r2");
        assert_eq!(result.merged[2].text, "local");
        assert_eq!(result.new_from_server, 2);
    }

    #[test]
    fn test_merge_keeps_duplicates_within_remote_batch() {
        let local = vec![quote("local", "x")];
        let remote = vec![quote("twice", SERVER_CATEGORY), quote("twice", SERVER_CATEGORY)];

        let result = merge_remote(&local, remote);

        assert_eq!(result.merged.len(), 3, "Remote-internal duplicates survive");
        assert_eq!(result.new_from_server, 2);
    }

    #[test]
    fn test_merge_category_not_part_of_dedup_key() {
        let local = vec![quote("same text", "Local")];
        let remote = vec![quote("same text", SERVER_CATEGORY)];

        let result = merge_remote(&local, remote);

        assert_eq!(result.merged.len(), 1);
        assert_eq!(result.merged[0].category, SERVER_CATEGORY);
    }

    #[test]
    fn test_sync_outcome_accessors() {
        let synced = SyncOutcome::Synced { new_from_server: 2, total: 7 };
        assert!(synced.is_success());
        assert_eq!(synced.new_count(), 2);

        let failed = SyncOutcome::NoServerData;
        assert!(!failed.is_success());
        assert_eq!(failed.new_count(), 0);
    }
}
