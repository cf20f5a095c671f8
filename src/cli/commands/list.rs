//! List command - print the collection, optionally filtered by category.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::OutputFormat;
use crate::storage::{Quote, QuoteStore, ALL_CATEGORIES};

/// Arguments for the list command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    adage list                     Full collection (honors 'adage use' filter)\n    \
    adage list --category Wisdom   One category only\n    \
    adage list --format json       Machine-readable output")]
pub struct Args {
    /// Restrict to one category, overriding the persisted filter
    #[arg(short, long)]
    pub category: Option<String>,

    /// Output format: text (default) or json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the list command.
pub fn run(args: Args) -> Result<()> {
    let store = QuoteStore::open_default()?;

    let filter = match args.category {
        Some(category) => category,
        None => store.selected_category(),
    };

    let quotes: Vec<&Quote> = if filter == ALL_CATEGORIES {
        store.quotes().iter().collect()
    } else {
        store
            .quotes()
            .iter()
            .filter(|q| q.category == filter)
            .collect()
    };

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&quotes)?);
        }
        OutputFormat::Text => {
            if quotes.is_empty() {
                if filter == ALL_CATEGORIES {
                    println!("{}", "No quotes in collection.".yellow());
                } else {
                    println!("{}", format!("No quotes in category '{filter}'.").yellow());
                }
                return Ok(());
            }

            if filter != ALL_CATEGORIES {
                println!("{}", format!("Category: {filter}").bold());
                println!();
            }

            for quote in &quotes {
                println!("  \"{}\"", quote.text);
                println!("      {}", format!("— {}", quote.category).dimmed());
            }

            println!();
            println!(
                "{}",
                format!("{} of {} quotes", quotes.len(), store.len()).dimmed()
            );
        }
    }

    Ok(())
}
