//! Use command - persist the category filter.
//!
//! The filter survives across invocations. A stored filter that stops
//! naming a present category (after a replace or import) is treated as
//! "all" on read, so any value is accepted here; unknown names just get
//! a warning.

use anyhow::Result;
use colored::Colorize;

use crate::storage::{QuoteStore, ALL_CATEGORIES};

/// Arguments for the use command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    adage use Wisdom    Show/list only the Wisdom category\n    \
    adage use all       Clear the filter")]
pub struct Args {
    /// Category name, or "all" to clear the filter
    #[arg(value_name = "CATEGORY")]
    pub category: String,
}

/// Executes the use command.
pub fn run(args: Args) -> Result<()> {
    let store = QuoteStore::open_default()?;

    store.select_category(&args.category);

    if args.category == ALL_CATEGORIES {
        println!("{}", "Category filter cleared.".green());
    } else if store.categories().contains(&args.category) {
        println!("{} {}", "Filtering on category:".green(), args.category);
    } else {
        println!(
            "{} {}",
            "Filtering on category:".green(),
            args.category
        );
        println!(
            "{}",
            "Note: no quotes currently carry this category; the filter will \
             fall back to 'all' until one does."
                .yellow()
        );
    }

    Ok(())
}
