//! SQLite-backed key-value storage for Adage
//!
//! The store mirrors the shape of the original browser storage: one key
//! holds the full quote collection as a JSON array, a second key holds the
//! last-selected category as a plain string. Reads of missing or corrupt
//! keys fall back to defaults without error.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

/// Key under which the full quote collection is stored as a JSON array.
pub const QUOTES_KEY: &str = "quotes_v1";

/// Key holding the last-selected category filter (plain string, not JSON).
pub const SELECTED_CATEGORY_KEY: &str = "selected_category";

/// Key holding the last quote displayed by `adage show` (JSON object).
pub const LAST_VIEWED_KEY: &str = "last_viewed";

/// Get the default database path
pub fn default_db_path() -> Result<PathBuf> {
    let config_dir = dirs::home_dir()
        .context("Could not find home directory")?
        .join(".adage");

    std::fs::create_dir_all(&config_dir)?;
    Ok(config_dir.join("adage.db"))
}

/// Database connection wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database
    pub fn open(path: &PathBuf) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open the default database
    pub fn open_default() -> Result<Self> {
        let path = default_db_path()?;
        Self::open(&path)
    }

    /// Run migrations
    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )?;
        Ok(())
    }

    /// Get a value by key. Missing keys return `None`.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to read key")
    }

    /// Set a value, replacing any previous one for the same key.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = ?2,
                updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key. Missing keys are not an error.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
