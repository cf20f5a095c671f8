//! Core data model for Adage
//!
//! A quote is the unit of data in the collection: a text/category pair.
//! There is no identifier field; identity for dedup purposes during sync
//! is the lowercased text.

use serde::{Deserialize, Serialize};

/// Category assigned when the user supplies none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Category assigned to quotes that arrive from the remote endpoint.
pub const SERVER_CATEGORY: &str = "Server";

/// Sentinel filter value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// A single quote in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote text. Non-empty after trimming.
    pub text: String,

    /// Display category. Falls back to "Uncategorized" when absent.
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

impl Quote {
    /// Creates a quote, trimming both fields and defaulting a blank category.
    pub fn new(text: &str, category: &str) -> Self {
        let category = category.trim();
        Self {
            text: text.trim().to_string(),
            category: if category.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                category.to_string()
            },
        }
    }

    /// Dedup identity: the lowercased text. Category is never part of it.
    pub fn dedup_key(&self) -> String {
        self.text.to_lowercase()
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" — {}", self.text, self.category)
    }
}

/// The fixed seed collection used when no stored data exists.
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The best way to predict the future is to invent it.",
            "Inspiration",
        ),
        Quote::new(
            "Life is 10% what happens to us and 90% how we react to it.",
            "Motivation",
        ),
        Quote::new("Stay hungry, stay foolish.", "Wisdom"),
    ]
}
