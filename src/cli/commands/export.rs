//! Export command - write the collection as pretty-printed JSON.
//!
//! The output is a plain JSON array of `{text, category}` objects, the
//! same shape the import command accepts.

use anyhow::Result;
use colored::Colorize;

use crate::storage::QuoteStore;

/// Arguments for the export command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    adage export                      Write quotes_export.json\n    \
    adage export --output backup.json Custom filename")]
pub struct Args {
    /// Output file
    #[arg(short, long, value_name = "FILE", default_value = "quotes_export.json")]
    pub output: String,
}

/// Executes the export command.
pub fn run(args: Args) -> Result<()> {
    let store = QuoteStore::open_default()?;

    let json = serde_json::to_string_pretty(store.quotes())?;
    std::fs::write(&args.output, &json)
        .map_err(|e| anyhow::anyhow!("Failed to write to {}: {}", args.output, e))?;

    println!(
        "{} {} quotes to {}",
        "Exported".green(),
        store.len(),
        args.output
    );

    Ok(())
}
