//! Configuration management
//!
//! Configuration lives at `~/.adage/config.yaml`. A missing file means all
//! defaults apply; unknown keys are ignored on load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::remote::DEFAULT_REMOTE_URL;

/// Floor for the sync interval. Ticks faster than this hammer the endpoint
/// without giving a cycle time to finish.
pub const MIN_SYNC_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote endpoint the reconciler fetches from and pushes back to.
    pub remote_url: String,

    /// Maximum number of remote records consumed per cycle.
    pub fetch_limit: usize,

    /// Seconds between reconciliation cycles in the daemon.
    pub sync_interval_secs: u64,

    /// Push the merged collection back to the remote after a successful
    /// cycle. Failures are logged only.
    pub push_back: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            fetch_limit: 5,
            sync_interval_secs: 30,
            push_back: true,
        }
    }
}

impl Config {
    /// Loads the configuration, falling back to defaults when the file
    /// does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Config =
            serde_saphyr::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Writes the configuration to disk.
    ///
    /// The config is four scalars, rendered by hand; serde-saphyr is a
    /// deserializer only.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let yaml = format!(
            "remote_url: {}\nfetch_limit: {}\nsync_interval_secs: {}\npush_back: {}\n",
            self.remote_url, self.fetch_limit, self.sync_interval_secs, self.push_back
        );
        std::fs::write(&path, yaml).context("Failed to write config file")?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(".adage");

        Ok(config_dir.join("config.yaml"))
    }

    /// The sync interval, clamped to the floor.
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.max(MIN_SYNC_INTERVAL_SECS))
    }
}
