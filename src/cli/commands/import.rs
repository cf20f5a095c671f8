//! Import command - load quotes from a JSON file.
//!
//! The file must hold a JSON array; each element needs a string `text`
//! field. Elements failing validation are dropped rather than rejecting
//! the whole batch. The user chooses append or replace semantics, either
//! via `--mode` or an interactive prompt.

use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use crate::storage::{Quote, QuoteStore, StoreError};

/// Import semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ImportMode {
    /// Append the imported quotes after the existing collection.
    Append,
    /// Replace the whole collection with the imported quotes.
    Replace,
}

/// Arguments for the import command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    adage import quotes_export.json                Prompt for append/replace\n    \
    adage import quotes_export.json --mode append  Append without prompting\n    \
    adage import backup.json --mode replace        Replace the collection")]
pub struct Args {
    /// JSON file to import
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Import semantics: append or replace
    #[arg(short, long, value_enum)]
    pub mode: Option<ImportMode>,
}

/// Executes the import command.
///
/// Validation failures (unreadable file, non-array JSON, nothing valid to
/// replace with) are reported as messages, never as a process failure.
pub fn run(args: Args) -> Result<()> {
    let content = match std::fs::read_to_string(&args.file) {
        Ok(content) => content,
        Err(e) => {
            println!("{}", format!("Could not read {}: {e}", args.file).red());
            return Ok(());
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(_) => {
            println!("{}", "Error reading JSON file.".red());
            return Ok(());
        }
    };

    let Some(elements) = value.as_array() else {
        println!(
            "{}",
            "Invalid JSON format. Must be an array of quotes.".red()
        );
        return Ok(());
    };

    let total = elements.len();
    let records: Vec<Quote> = elements
        .iter()
        .filter_map(|el| serde_json::from_value(el.clone()).ok())
        .collect();
    let dropped = total - records.len();

    let mode = match args.mode {
        Some(mode) => mode,
        None => match prompt_mode()? {
            Some(mode) => mode,
            None => {
                println!("{}", "Import cancelled.".yellow());
                return Ok(());
            }
        },
    };

    let mut store = QuoteStore::open_default()?;

    match mode {
        ImportMode::Append => {
            let appended = store.append_all(records);
            println!(
                "{}",
                format!("Imported {appended} quotes (appended).").green()
            );
        }
        ImportMode::Replace => match store.replace_all(records) {
            Ok(kept) => {
                println!(
                    "{}",
                    format!("Imported {kept} quotes (collection replaced).").green()
                );
            }
            Err(StoreError::EmptyReplacement) => {
                println!(
                    "{}",
                    "No valid quotes in file; collection left unchanged.".yellow()
                );
                return Ok(());
            }
            Err(e) => {
                println!("{}", e.to_string().yellow());
                return Ok(());
            }
        },
    }

    if dropped > 0 {
        println!(
            "{}",
            format!("({dropped} invalid entries dropped)").dimmed()
        );
    }

    Ok(())
}

/// Asks the user to choose append or replace on stdin.
///
/// Returns `None` when the answer is unrecognized.
fn prompt_mode() -> Result<Option<ImportMode>> {
    print!("Append to or replace the existing collection? [a/r] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    Ok(match answer.trim().to_lowercase().as_str() {
        "a" | "append" => Some(ImportMode::Append),
        "r" | "replace" => Some(ImportMode::Replace),
        _ => None,
    })
}
