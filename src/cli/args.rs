//! CLI argument definitions using clap
//!
//! Commands:
//! - restaurant-data build [--skip-html]
//! - restaurant-data validate [PATH]
//!
//! `--root` and `--config` are accepted by both.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Aggregate and validate per-restaurant YAML records
#[derive(Parser, Debug)]
#[command(name = "restaurant-data")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repository root that relative config paths are resolved against
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Optional JSON config file overriding the default paths
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge source files into the consolidated YAML outputs
    Build {
        /// Do not touch the HTML table
        #[arg(long)]
        skip_html: bool,
    },

    /// Validate a consolidated YAML file
    Validate {
        /// File to validate (defaults to the canonical output)
        path: Option<PathBuf>,
    },
}
