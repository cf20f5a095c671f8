//! The quote store: an ordered in-memory collection mirrored to the
//! key-value database on every mutation.
//!
//! The in-memory collection is the source of truth for the process
//! lifetime. Persistence writes are synchronous whole-value replacements;
//! a failed write is logged and otherwise ignored.

use anyhow::Result;
use rand::seq::SliceRandom;

use super::db::{Database, LAST_VIEWED_KEY, QUOTES_KEY, SELECTED_CATEGORY_KEY};
use super::models::{seed_quotes, Quote, ALL_CATEGORIES};

/// Validation failures on store mutations. These are always recovered by
/// the caller and surfaced as a user-facing message, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Append was given blank or whitespace-only text.
    #[error("Quote text cannot be empty")]
    EmptyText,

    /// A replacement batch contained no valid records.
    #[error("No valid quotes to replace the collection with")]
    EmptyReplacement,
}

/// Ordered quote collection backed by the key-value database.
pub struct QuoteStore {
    db: Database,
    quotes: Vec<Quote>,
}

impl QuoteStore {
    /// Opens the store, loading the persisted collection.
    ///
    /// An absent or malformed (non-array JSON) stored value is treated
    /// identically: the collection is initialized with the seed quotes and
    /// persisted immediately. Malformed data is never surfaced as an error.
    pub fn open(db: Database) -> Result<Self> {
        let mut store = Self { db, quotes: Vec::new() };
        store.load();
        Ok(store)
    }

    /// Opens the store on the default database.
    pub fn open_default() -> Result<Self> {
        Self::open(Database::open_default()?)
    }

    fn load(&mut self) {
        let stored = match self.db.get(QUOTES_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read stored quotes: {e}");
                None
            }
        };

        match stored.and_then(|json| serde_json::from_str::<Vec<Quote>>(&json).ok()) {
            Some(quotes) => self.quotes = quotes,
            None => {
                tracing::debug!("No stored collection, seeding defaults");
                self.quotes = seed_quotes();
                self.persist();
            }
        }
    }

    /// The full collection, in insertion order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Number of quotes in the collection.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// True when the collection holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Appends a single quote and persists.
    ///
    /// Text blank after trimming is rejected; a blank category falls back
    /// to the "Uncategorized" sentinel.
    pub fn append(&mut self, text: &str, category: &str) -> Result<(), StoreError> {
        if text.trim().is_empty() {
            return Err(StoreError::EmptyText);
        }

        self.quotes.push(Quote::new(text, category));
        self.persist();
        Ok(())
    }

    /// Replaces the whole collection and persists.
    ///
    /// Records without usable text are silently dropped; if nothing valid
    /// remains the operation is rejected and the collection is untouched.
    /// Returns the number of records kept.
    pub fn replace_all(&mut self, records: Vec<Quote>) -> Result<usize, StoreError> {
        let valid = Self::validate_batch(records);
        if valid.is_empty() {
            return Err(StoreError::EmptyReplacement);
        }

        let count = valid.len();
        self.quotes = valid;
        self.persist();
        Ok(count)
    }

    /// Appends a batch of records and persists. No dedup is performed.
    ///
    /// Records without usable text are silently dropped. Returns the number
    /// of records appended.
    pub fn append_all(&mut self, records: Vec<Quote>) -> usize {
        let valid = Self::validate_batch(records);
        let count = valid.len();
        if count > 0 {
            self.quotes.extend(valid);
            self.persist();
        }
        count
    }

    fn validate_batch(records: Vec<Quote>) -> Vec<Quote> {
        records
            .into_iter()
            .filter_map(|record| {
                if record.text.trim().is_empty() {
                    tracing::debug!("Dropping record without usable text");
                    None
                } else {
                    Some(Quote::new(&record.text, &record.category))
                }
            })
            .collect()
    }

    /// Distinct categories present in the collection, sorted for display.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.quotes.iter().map(|q| q.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// A uniformly random quote, optionally restricted to a category.
    pub fn random(&self, category: Option<&str>) -> Option<&Quote> {
        let mut rng = rand::thread_rng();
        match category {
            Some(cat) if cat != ALL_CATEGORIES => {
                let filtered: Vec<&Quote> = self
                    .quotes
                    .iter()
                    .filter(|q| q.category == cat)
                    .collect();
                filtered.choose(&mut rng).copied()
            }
            _ => self.quotes.choose(&mut rng),
        }
    }

    /// The persisted category filter, validated against the collection.
    ///
    /// A stored value that no longer names a present category (after a
    /// replace or import) falls back to "all".
    pub fn selected_category(&self) -> String {
        let stored = match self.db.get(SELECTED_CATEGORY_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return ALL_CATEGORIES.to_string(),
            Err(e) => {
                tracing::warn!("Failed to read selected category: {e}");
                return ALL_CATEGORIES.to_string();
            }
        };

        if stored == ALL_CATEGORIES || self.categories().contains(&stored) {
            stored
        } else {
            ALL_CATEGORIES.to_string()
        }
    }

    /// Persists the category filter. The value is validated on read, so
    /// any string is accepted here.
    pub fn select_category(&self, category: &str) {
        if let Err(e) = self.db.set(SELECTED_CATEGORY_KEY, category) {
            tracing::warn!("Failed to persist selected category: {e}");
        }
    }

    /// Records the last quote displayed to the user.
    pub fn set_last_viewed(&self, quote: &Quote) {
        match serde_json::to_string(quote) {
            Ok(json) => {
                if let Err(e) = self.db.set(LAST_VIEWED_KEY, &json) {
                    tracing::warn!("Failed to persist last viewed quote: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize last viewed quote: {e}"),
        }
    }

    /// The last quote displayed, if any was recorded.
    pub fn last_viewed(&self) -> Option<Quote> {
        self.db
            .get(LAST_VIEWED_KEY)
            .ok()
            .flatten()
            .and_then(|json| serde_json::from_str(&json).ok())
    }

    fn persist(&self) {
        match serde_json::to_string(&self.quotes) {
            Ok(json) => {
                if let Err(e) = self.db.set(QUOTES_KEY, &json) {
                    tracing::warn!("Failed to persist quotes: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize quotes: {e}"),
        }
    }
}
