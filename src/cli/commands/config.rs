//! Config command - manage configuration

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use crate::config::Config;
use crate::storage::default_db_path;

#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(),
        Some(ConfigCommand::Get { key }) => get_config(&key),
        Some(ConfigCommand::Set { key, value }) => set_config(&key, &value),
    }
}

fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Adage Configuration".bold());
    println!();
    println!("  {}  {}", "remote_url:".dimmed(), config.remote_url);
    println!("  {}  {}", "fetch_limit:".dimmed(), config.fetch_limit);
    println!(
        "  {}  {}",
        "sync_interval_secs:".dimmed(),
        config.sync_interval_secs
    );
    println!("  {}  {}", "push_back:".dimmed(), config.push_back);
    println!();
    println!("  {}  {}", "Config file:".dimmed(), Config::config_path()?.display());
    println!("  {}  {}", "Database:".dimmed(), default_db_path()?.display());

    Ok(())
}

fn get_config(key: &str) -> Result<()> {
    let config = Config::load()?;

    match key {
        "remote_url" => println!("{}", config.remote_url),
        "fetch_limit" => println!("{}", config.fetch_limit),
        "sync_interval_secs" => println!("{}", config.sync_interval_secs),
        "push_back" => println!("{}", config.push_back),
        _ => println!("{}", format!("Config key '{key}' not found").yellow()),
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "remote_url" => config.remote_url = value.to_string(),
        "fetch_limit" => {
            config.fetch_limit = value
                .parse()
                .with_context(|| format!("'{value}' is not a valid count"))?;
        }
        "sync_interval_secs" => {
            config.sync_interval_secs = value
                .parse()
                .with_context(|| format!("'{value}' is not a valid number of seconds"))?;
        }
        "push_back" => {
            config.push_back = value
                .parse()
                .with_context(|| format!("'{value}' is not true or false"))?;
        }
        _ => {
            println!("{}", format!("Config key '{key}' not found").yellow());
            println!(
                "{}",
                "Valid keys: remote_url, fetch_limit, sync_interval_secs, push_back".dimmed()
            );
            return Ok(());
        }
    }

    config.save()?;
    println!("{} {key} = {value}", "Set".green());

    Ok(())
}
