//! Integration tests for Adage CLI commands
//!
//! These tests exercise the CLI commands through their underlying library
//! functions using temporary databases to ensure test isolation, plus a
//! few binary-level smoke tests with an isolated HOME.

use adage::reconcile::{map_remote, merge_remote, SyncOutcome};
use adage::remote::RemoteRecord;
use adage::storage::{
    Database, Quote, QuoteStore, StoreError, ALL_CATEGORIES, SERVER_CATEGORY,
};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Creates a test store in a temporary directory.
/// Returns the QuoteStore and the temp directory (which must be kept alive).
fn create_test_store() -> (QuoteStore, tempfile::TempDir) {
    let dir = tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).expect("Failed to open test database");
    let store = QuoteStore::open(db).expect("Failed to open store");
    (store, dir)
}

/// Creates a quote with the given text and category.
fn quote(text: &str, category: &str) -> Quote {
    Quote::new(text, category)
}

/// Runs the adage binary with HOME pointed at the given directory.
fn adage_cmd(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("adage").expect("Binary should build");
    cmd.env("HOME", home.path());
    cmd
}

// =============================================================================
// Store Tests
// =============================================================================

mod store_tests {
    use super::*;

    #[test]
    fn test_append_grows_collection_by_one() {
        let (mut store, _dir) = create_test_store();
        let before = store.len();

        store
            .append("Fresh line for the collection", "Test")
            .expect("Valid append should succeed");

        assert_eq!(store.len(), before + 1);
        assert!(
            store
                .quotes()
                .iter()
                .any(|q| q.text == "Fresh line for the collection"),
            "Appended quote should be retrievable by exact text"
        );
    }

    #[test]
    fn test_append_whitespace_only_rejected() {
        let (mut store, _dir) = create_test_store();
        let before = store.quotes().to_vec();

        let result = store.append(" \t\n ", "Test");

        assert!(matches!(result, Err(StoreError::EmptyText)));
        assert_eq!(store.quotes(), &before[..], "Collection must be unchanged");
    }

    #[test]
    fn test_replace_then_stale_filter_falls_back_to_all() {
        let (mut store, _dir) = create_test_store();
        store.append("categorized", "Rare").unwrap();
        store.select_category("Rare");
        assert_eq!(store.selected_category(), "Rare");

        store
            .replace_all(vec![quote("replacement", "Other")])
            .unwrap();

        assert_eq!(
            store.selected_category(),
            ALL_CATEGORIES,
            "Stale filter should fall back to 'all'"
        );
    }

    #[test]
    fn test_collection_restored_across_open() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        {
            let db = Database::open(&db_path).unwrap();
            let mut store = QuoteStore::open(db).unwrap();
            store.append("survives restart", "Test").unwrap();
        }

        let db = Database::open(&db_path).unwrap();
        let store = QuoteStore::open(db).unwrap();
        assert!(store.quotes().iter().any(|q| q.text == "survives restart"));
    }
}

// =============================================================================
// Merge Tests
// =============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_empty_remote_batch_is_identity() {
        let local = vec![quote("a", "x"), quote("b", "y")];

        let result = merge_remote(&local, Vec::new());

        assert_eq!(result.merged, local, "Local collection must be untouched");
        assert_eq!(result.new_from_server, 0);
    }

    #[test]
    fn test_text_collision_is_deterministic() {
        let local = vec![quote("A", "x")];
        let remote = vec![quote("a", SERVER_CATEGORY)];

        let result = merge_remote(&local, remote);

        assert_eq!(result.merged.len(), 1, "Exactly one record must survive");
        assert_eq!(result.merged[0].text, "a");
        assert_eq!(result.merged[0].category, SERVER_CATEGORY, "Remote wins");
    }

    #[test]
    fn test_unmatched_locals_preserved_after_remote_in_order() {
        let local = vec![
            quote("first local", "x"),
            quote("collides", "x"),
            quote("second local", "y"),
        ];
        let remote = vec![
            quote("COLLIDES", SERVER_CATEGORY),
            quote("server only", SERVER_CATEGORY),
        ];

        let result = merge_remote(&local, remote);

        let texts: Vec<&str> = result.merged.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["COLLIDES", "server only", "first local", "second local"],
            "Remote first, surviving locals after, relative order kept"
        );
    }

    #[test]
    fn test_remote_internal_duplicates_survive() {
        let local = vec![quote("local", "x")];
        let remote = vec![
            quote("repeat", SERVER_CATEGORY),
            quote("repeat", SERVER_CATEGORY),
        ];

        let result = merge_remote(&local, remote);

        assert_eq!(
            result.merged.len(),
            3,
            "Dedup applies only between remote and local"
        );
    }

    #[test]
    fn test_map_remote_consumes_only_title() {
        let records: Vec<RemoteRecord> = serde_json::from_str(
            r#"[
                {"userId": 1, "id": 1, "title": "first", "body": "ignored"},
                {"userId": 1, "id": 2, "body": "no title"},
                {"userId": 1, "id": 3, "title": "second"}
            ]"#,
        )
        .unwrap();

        let quotes = map_remote(records);

        assert_eq!(quotes.len(), 2);
        assert!(quotes.iter().all(|q| q.category == SERVER_CATEGORY));
    }

    #[test]
    fn test_merged_collection_replaces_store_in_full() {
        let (mut store, _dir) = create_test_store();
        let remote = vec![quote("from server", SERVER_CATEGORY)];

        let result = merge_remote(store.quotes(), remote);
        let expected = result.merged.clone();
        store.replace_all(result.merged).unwrap();

        assert_eq!(store.quotes(), &expected[..]);
    }

    #[test]
    fn test_sync_outcome_reporting() {
        let outcome = SyncOutcome::Synced { new_from_server: 3, total: 8 };
        assert!(outcome.is_success());
        assert_eq!(outcome.new_count(), 3);
        assert!(!SyncOutcome::NoServerData.is_success());
    }
}

// =============================================================================
// Export / Import Tests
// =============================================================================

mod export_import_tests {
    use super::*;

    #[test]
    fn test_export_import_append_doubles_collection() {
        let (mut store, dir) = create_test_store();
        let before = store.len();

        // Export: the same pretty-printed JSON array the command writes
        let exported = serde_json::to_string_pretty(store.quotes()).unwrap();
        let path = dir.path().join("quotes_export.json");
        std::fs::write(&path, &exported).unwrap();

        // Import in append mode: no dedup
        let content = std::fs::read_to_string(&path).unwrap();
        let records: Vec<Quote> = serde_json::from_str(&content).unwrap();
        let appended = store.append_all(records);

        assert_eq!(appended, before);
        assert_eq!(store.len(), before * 2, "Append-import must not dedup");
        for text in store.quotes().iter().map(|q| q.text.clone()).take(before) {
            let count = store.quotes().iter().filter(|q| q.text == text).count();
            assert_eq!(count, 2, "Every original record duplicated exactly once");
        }
    }

    #[test]
    fn test_import_replace_drops_invalid_elements() {
        let (mut store, _dir) = create_test_store();

        let content = r#"[
            {"text": "valid one", "category": "Imported"},
            {"category": "missing text"},
            {"text": 42},
            {"text": "valid two"}
        ]"#;
        let elements: Vec<serde_json::Value> = serde_json::from_str(content).unwrap();
        let records: Vec<Quote> = elements
            .iter()
            .filter_map(|el| serde_json::from_value(el.clone()).ok())
            .collect();

        let kept = store.replace_all(records).unwrap();

        assert_eq!(kept, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.quotes()[1].category, "Uncategorized");
    }

    #[test]
    fn test_import_replace_nothing_valid_rejected() {
        let (mut store, _dir) = create_test_store();
        let before = store.len();

        let result = store.replace_all(Vec::new());

        assert!(matches!(result, Err(StoreError::EmptyReplacement)));
        assert_eq!(store.len(), before);
    }
}

// =============================================================================
// Binary Smoke Tests
// =============================================================================

mod binary_tests {
    use super::*;

    #[test]
    fn test_help_lists_commands() {
        let home = tempdir().unwrap();
        adage_cmd(&home)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("show"))
            .stdout(predicate::str::contains("sync"))
            .stdout(predicate::str::contains("daemon"));
    }

    #[test]
    fn test_add_and_list() {
        let home = tempdir().unwrap();

        adage_cmd(&home)
            .args(["add", "Integration test line", "--category", "Testing"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added:"));

        adage_cmd(&home)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("Integration test line"));
    }

    #[test]
    fn test_add_blank_text_reports_rejection() {
        let home = tempdir().unwrap();

        adage_cmd(&home)
            .args(["add", "   "])
            .assert()
            .success()
            .stdout(predicate::str::contains("cannot be empty"));
    }

    #[test]
    fn test_export_import_round_trip() {
        let home = tempdir().unwrap();
        let export_path = home.path().join("quotes_export.json");
        let export_arg = export_path.to_string_lossy().to_string();

        adage_cmd(&home)
            .args(["export", "--output", &export_arg])
            .assert()
            .success()
            .stdout(predicate::str::contains("Exported"));

        // Seed collection has 3 quotes; append-import doubles it
        adage_cmd(&home)
            .args(["import", &export_arg, "--mode", "append"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Imported 3 quotes"));

        adage_cmd(&home)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("6 of 6 quotes"));
    }

    #[test]
    fn test_use_unknown_category_warns_and_falls_back() {
        let home = tempdir().unwrap();

        adage_cmd(&home)
            .args(["use", "NoSuchCategory"])
            .assert()
            .success()
            .stdout(predicate::str::contains("fall back"));

        // The stale filter falls back to 'all': the full seed set lists
        adage_cmd(&home)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("3 of 3 quotes"));
    }

    #[test]
    fn test_status_reports_collection() {
        let home = tempdir().unwrap();

        adage_cmd(&home)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Collection:"))
            .stdout(predicate::str::contains("Never synced"));
    }
}
