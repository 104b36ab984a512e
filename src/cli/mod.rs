//! CLI module for restaurant-data
//!
//! Provides command-line interface for:
//! - build: aggregate per-restaurant files into the consolidated outputs
//! - validate: check a consolidated file against the record schema

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build, run, run_command, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_lines;
