use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod daemon;
mod reconcile;
mod remote;
mod storage;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "adage")]
#[command(version)]
#[command(about = "Collect, categorize, and sync quotable lines from your terminal")]
#[command(long_about = "Adage keeps an ordered collection of quotes with categories,\n\
    persisted locally and periodically reconciled against a remote\n\
    endpoint. On a text collision the server version wins; everything\n\
    else is a union.")]
#[command(after_help = "EXAMPLES:\n    \
    adage show               Display a random quote\n    \
    adage add \"...\"          Add a quote\n    \
    adage use Wisdom         Filter on one category\n    \
    adage export             Write quotes_export.json\n    \
    adage import file.json   Import from a JSON file\n    \
    adage sync               Reconcile with the remote endpoint once\n    \
    adage daemon start       Sync periodically in the background\n\n\
    For more information about a command, run 'adage <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Display a random quote
    #[command(long_about = "Displays a uniformly random quote from the collection,\n\
        honoring the category filter persisted by 'adage use' unless\n\
        overridden with --category. Use --last to redisplay the quote\n\
        shown most recently.")]
    Show(commands::show::Args),

    /// Add a quote to the collection
    #[command(long_about = "Appends a quote to the collection and persists it.\n\
        Blank text is rejected; a blank category falls back to\n\
        'Uncategorized'.")]
    Add(commands::add::Args),

    /// List the collection, optionally filtered by category
    List(commands::list::Args),

    /// List distinct categories with counts
    Categories(commands::categories::Args),

    /// Persist a category filter for show/list
    #[command(name = "use")]
    #[command(long_about = "Persists a category filter that show and list honor across\n\
        invocations. Pass 'all' to clear it. A filter whose category\n\
        disappears (after a replace or import) falls back to 'all'.")]
    Use(commands::use_category::Args),

    /// Export the collection as pretty-printed JSON
    Export(commands::export::Args),

    /// Import quotes from a JSON file
    #[command(long_about = "Imports quotes from a JSON array of {text, category} objects.\n\
        Elements without a string 'text' are dropped. Choose append or\n\
        replace semantics with --mode, or answer the prompt.")]
    Import(commands::import::Args),

    /// Reconcile with the remote endpoint once
    #[command(long_about = "Runs one reconciliation cycle: fetch a bounded batch from the\n\
        remote endpoint, merge it with the local collection (union by\n\
        lowercased text, server wins on collision), persist the result,\n\
        and report the outcome.")]
    Sync(commands::sync::Args),

    /// Show collection, sync, and daemon status
    Status,

    /// View and manage configuration settings
    #[command(long_about = "Provides subcommands to show, get, and set configuration values.\n\
        Configuration is stored in ~/.adage/config.yaml.")]
    Config(commands::config::Args),

    /// Manage the background sync daemon
    #[command(long_about = "Controls the background daemon that periodically reconciles the\n\
        local collection against the remote endpoint.")]
    Daemon(commands::daemon::Args),

    /// Generate shell completion scripts
    Completions(commands::completions::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "adage=debug"
    } else {
        "adage=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Show(args) => commands::show::run(args),
        Commands::Add(args) => commands::add::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Categories(args) => commands::categories::run(args),
        Commands::Use(args) => commands::use_category::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Import(args) => commands::import::run(args),
        Commands::Sync(args) => commands::sync::run(args),
        Commands::Status => commands::status::run(),
        Commands::Config(args) => commands::config::run(args),
        Commands::Daemon(args) => commands::daemon::run(args),
        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            commands::completions::generate_completions(&mut cmd, args.shell);
            Ok(())
        }
    }
}
