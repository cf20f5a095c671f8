//! Show command - display a random quote.
//!
//! Picks a uniformly random quote, respecting the persisted category
//! filter unless overridden on the command line. The displayed quote is
//! recorded so `--last` can bring it back.

use anyhow::Result;
use colored::Colorize;

use crate::storage::{QuoteStore, ALL_CATEGORIES};

/// Arguments for the show command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    adage show                   Random quote (honors 'adage use' filter)\n    \
    adage show --category Wisdom Random quote from one category\n    \
    adage show --last            Redisplay the last shown quote")]
pub struct Args {
    /// Restrict to one category, overriding the persisted filter
    #[arg(short, long)]
    pub category: Option<String>,

    /// Redisplay the last shown quote instead of picking a new one
    #[arg(long)]
    pub last: bool,
}

/// Executes the show command.
pub fn run(args: Args) -> Result<()> {
    let store = QuoteStore::open_default()?;

    if args.last {
        match store.last_viewed() {
            Some(quote) => println!("{quote}"),
            None => println!("{}", "No quote shown yet.".dimmed()),
        }
        return Ok(());
    }

    let filter = match args.category {
        Some(category) => category,
        None => store.selected_category(),
    };

    let picked = if filter == ALL_CATEGORIES {
        store.random(None)
    } else {
        store.random(Some(&filter))
    };

    match picked {
        Some(quote) => {
            println!("{quote}");
            store.set_last_viewed(quote);
        }
        None => {
            if filter == ALL_CATEGORIES {
                println!("{}", "No quotes available.".yellow());
            } else {
                println!("{}", format!("No quotes in category '{filter}'.").yellow());
            }
        }
    }

    Ok(())
}
