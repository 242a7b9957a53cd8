//! Runtime configuration.
//!
//! Settings come from an optional TOML file; command-line flags override
//! individual values.  Every field has a default, so running without a
//! config file talks to the local catalog endpoint.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Endpoint serving `{ "listApi": { ... } }`.
    pub catalog_url: String,
    /// Per-request timeout.  Unset means requests may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Interval between UI ticks.
    pub tick_rate_ms: u64,
    /// Log file location.  Defaults to `portal-berita.log` in the temp dir.
    pub log_file: Option<PathBuf>,
    /// Clear the type filter when another source is picked.
    pub reset_type_on_source_change: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            request_timeout_secs: None,
            tick_rate_ms: 100,
            log_file: None,
            reset_type_on_source_change: false,
        }
    }
}

impl Config {
    /// Read a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build the effective config: file (if given) then CLI overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(url) = &cli.catalog_url {
            config.catalog_url = url.clone();
        }
        if let Some(path) = &cli.log_file {
            config.log_file = Some(path.clone());
        }
        Ok(config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("portal-berita.log"))
    }
}
