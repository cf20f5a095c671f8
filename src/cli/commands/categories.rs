//! Categories command - list distinct categories with counts.

use anyhow::Result;
use colored::Colorize;

use crate::storage::{QuoteStore, ALL_CATEGORIES};

/// Arguments for the categories command.
#[derive(clap::Args)]
pub struct Args {}

/// Executes the categories command.
///
/// Prints the distinct categories present in the collection, sorted,
/// with per-category counts. The persisted filter is marked.
pub fn run(_args: Args) -> Result<()> {
    let store = QuoteStore::open_default()?;
    let selected = store.selected_category();

    if store.is_empty() {
        println!("{}", "No quotes in collection.".yellow());
        return Ok(());
    }

    println!("{}", "Categories".bold());
    println!();

    for category in store.categories() {
        let count = store
            .quotes()
            .iter()
            .filter(|q| q.category == category)
            .count();
        let marker = if category == selected {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!("  {} {:24} {}", marker, category, format!("{count}").dimmed());
    }

    println!();
    if selected == ALL_CATEGORIES {
        println!("{}", "Filter: all (no category filter)".dimmed());
    } else {
        println!("{}", format!("Filter: {selected} (* above)").dimmed());
    }

    Ok(())
}
