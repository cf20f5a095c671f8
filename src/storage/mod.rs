//! Persistent storage for the quote collection

pub mod db;
pub mod models;
pub mod store;

pub use db::{default_db_path, Database};
pub use models::{seed_quotes, Quote, ALL_CATEGORIES, SERVER_CATEGORY, UNCATEGORIZED};
pub use store::{QuoteStore, StoreError};
