//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;

/// Browse news from the sources listed by a catalog endpoint.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Catalog endpoint URL (overrides the config file)
    #[arg(short = 'u', long)]
    pub catalog_url: Option<String>,

    /// Where to write the log file (overrides the config file)
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,
}
