//! CLI commands for Adage.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Append a quote to the collection.
pub mod add;

/// List distinct categories with counts.
pub mod categories;

/// Generate shell completion scripts.
pub mod completions;

/// Configuration viewing and management.
pub mod config;

/// Manage the background sync daemon.
pub mod daemon;

/// Export the collection as pretty-printed JSON.
pub mod export;

/// Import quotes from a JSON file.
pub mod import;

/// Print the collection, optionally filtered.
pub mod list;

/// Display a random quote.
pub mod show;

/// Show collection, sync, and daemon status.
pub mod status;

/// Run one reconciliation cycle in the foreground.
pub mod sync;

/// Persist the category filter.
pub mod use_category;
