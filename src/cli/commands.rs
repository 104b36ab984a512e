//! CLI command implementations
//!
//! Commands return the process exit status. Fatal problems come back as
//! `CliError` instead, and `main` turns those into status 1.

use std::io::{self, Write};
use std::path::Path;

use clap::Parser;

use crate::aggregate::{self, AggregateOptions};
use crate::config::Config;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{load_entries_file, validate_entries};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::write_lines;

/// Parse process arguments and run the selected command.
///
/// Usage errors print clap's message and return status 1; `--help` and
/// `--version` return 0.
pub fn run() -> CliResult<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print()?;
            return Ok(parse_status(&e));
        }
    };

    run_command(cli, &mut io::stdout().lock())
}

/// Exit status for a failed parse: 1 for usage errors, 0 for help/version.
fn parse_status(e: &clap::Error) -> i32 {
    if e.use_stderr() {
        1
    } else {
        0
    }
}

/// Run a parsed command, writing its result lines to `out`.
pub fn run_command<W: Write>(cli: Cli, out: &mut W) -> CliResult<i32> {
    let config = load_config(&cli.root, cli.config.as_deref())?;

    match cli.command {
        Command::Build { skip_html } => build(&config, skip_html, out),
        Command::Validate { path } => {
            let path = path.unwrap_or_else(|| config.aggregate_path.clone());
            validate(&path, out)
        }
    }
}

fn load_config(root: &Path, path: Option<&Path>) -> CliResult<Config> {
    let config = Config::load_or_default(path)?.resolve(root);
    let (root, source) = (root.display().to_string(), config.source_dir.display().to_string());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("root", root.as_str()), ("source_dir", source.as_str())],
    );
    Ok(config)
}

/// Aggregate source files into the configured outputs.
pub fn build<W: Write>(config: &Config, skip_html: bool, out: &mut W) -> CliResult<i32> {
    let options = AggregateOptions {
        regenerate_html: !skip_html,
    };
    let report = aggregate::run(config, options)?;
    write_lines(out, &report.lines())?;
    Ok(0)
}

/// Validate a consolidated file. Status 1 iff any violation was printed.
pub fn validate<W: Write>(path: &Path, out: &mut W) -> CliResult<i32> {
    let shown = path.display().to_string();
    log_event_with_fields(Event::ValidationStart, &[("path", shown.as_str())]);

    let entries = load_entries_file(path)?;
    let report = validate_entries(&entries);

    let (records, violations) = (
        report.record_count().to_string(),
        report.violations().len().to_string(),
    );
    log_event_with_fields(
        Event::ValidationComplete,
        &[
            ("path", shown.as_str()),
            ("records", records.as_str()),
            ("violations", violations.as_str()),
        ],
    );

    write_lines(out, &report.lines())?;
    Ok(report.exit_status())
}
