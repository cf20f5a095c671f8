//! Command-line interface for Adage.
//!
//! Provides the CLI commands for interacting with the quote collection.
//! Commands include browsing, adding, filtering, import/export, and
//! sync against the remote endpoint.

/// Individual CLI command implementations.
pub mod commands;

/// Output formatting utilities shared by commands.
pub mod format;
