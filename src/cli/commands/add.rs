//! Add command - append a quote to the collection.

use anyhow::Result;
use colored::Colorize;

use crate::storage::{QuoteStore, StoreError};

/// Arguments for the add command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    adage add \"Talk is cheap. Show me the code.\"\n    \
    adage add \"Simplicity is prerequisite for reliability.\" --category Wisdom")]
pub struct Args {
    /// The quote text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Category for the quote (defaults to "Uncategorized")
    #[arg(short, long, default_value = "")]
    pub category: String,
}

/// Executes the add command.
///
/// Validation failures are reported as a message, never as a process
/// failure.
pub fn run(args: Args) -> Result<()> {
    let mut store = QuoteStore::open_default()?;

    match store.append(&args.text, &args.category) {
        Ok(()) => {
            if let Some(added) = store.quotes().last() {
                println!("{} {}", "Added:".green(), added);
            }
            println!(
                "{}",
                format!("{} quotes in collection", store.len()).dimmed()
            );
        }
        Err(StoreError::EmptyText) => {
            println!("{}", "Quote text cannot be empty.".yellow());
        }
        Err(e) => {
            println!("{}", e.to_string().yellow());
        }
    }

    Ok(())
}
