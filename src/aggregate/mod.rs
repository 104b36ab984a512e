//! Aggregation pipeline
//!
//! ```text
//! source_dir/*.yaml -> load_entries (flatten + stable sort by name)
//!                   -> aggregate_path         (always)
//!                   -> docs_path              (if its folder exists)
//!                   -> html_path marker table (if file and markers exist)
//! ```
//!
//! All inputs are loaded before anything is written, so a malformed source
//! file aborts the run with no output. A failing YAML write aborts the
//! remaining steps; earlier writes are not rolled back. The HTML step only
//! ever skips.

mod errors;
mod html;
mod loader;
mod writer;

pub use errors::{AggregateError, AggregateResult};
pub use html::{escape_html, regenerate_table, render_table, splice_region, HtmlOutcome, HtmlSkipReason};
pub use loader::{list_source_files, load_entries, load_source_file, sort_entries, sort_key};
pub use writer::{write_entries, write_entries_if_dir_exists, OutputOutcome};

use crate::config::Config;
use crate::observability::{log_event, log_event_with_fields, Event, ObservationScope};

/// Switches for optional aggregation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    pub regenerate_html: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            regenerate_html: true,
        }
    }
}

/// What an aggregation run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    pub entries: usize,
    pub outputs: Vec<OutputOutcome>,
    pub html: HtmlOutcome,
}

impl AggregateReport {
    /// Human-readable summary, one line per output.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .outputs
            .iter()
            .map(|outcome| match outcome {
                OutputOutcome::Written { path, entries } => {
                    format!("Wrote {} entries to {}", entries, path.display())
                }
                OutputOutcome::Skipped { path, reason } => {
                    format!("{}; skipped writing {}", reason, path.display())
                }
            })
            .collect();

        lines.push(match &self.html {
            HtmlOutcome::Written { path, rows } => {
                format!("Updated restaurant table in {} ({} rows)", path.display(), rows)
            }
            HtmlOutcome::Skipped { path, reason } => format!(
                "Skipped restaurant table in {}: {}",
                path.display(),
                reason.describe()
            ),
        });

        lines
    }
}

/// Runs the whole aggregation against the (already resolved) config.
pub fn run(config: &Config, options: AggregateOptions) -> AggregateResult<AggregateReport> {
    if !config.source_dir.is_dir() {
        return Err(AggregateError::SourceDirMissing(config.source_dir.clone()));
    }

    let source = config.source_dir.display().to_string();
    let scope = ObservationScope::with_fields("AGGREGATE", &[("source_dir", source.as_str())]);
    log_event(Event::SourceScanStart);

    let entries = match load_entries(&config.source_dir, &config.source_extensions) {
        Ok(entries) => entries,
        Err(e) => {
            scope.fail(&e.to_string());
            return Err(e);
        }
    };

    let result = publish(config, options, &entries);
    match &result {
        Ok(_) => {
            let count = entries.len().to_string();
            scope.complete_with_fields(&[("entries", count.as_str())]);
        }
        Err(e) => scope.fail(&e.to_string()),
    }
    result
}

fn publish(
    config: &Config,
    options: AggregateOptions,
    entries: &[serde_yaml::Value],
) -> AggregateResult<AggregateReport> {
    let outputs = vec![
        write_entries(&config.aggregate_path, entries)?,
        write_entries_if_dir_exists(&config.docs_path, entries)?,
    ];
    for outcome in &outputs {
        log_output(outcome);
    }

    let html = if options.regenerate_html {
        regenerate_table(
            &config.html_path,
            entries,
            &config.html_start_marker,
            &config.html_end_marker,
        )
    } else {
        HtmlOutcome::Skipped {
            path: config.html_path.clone(),
            reason: HtmlSkipReason::Disabled,
        }
    };
    log_html(&html);

    Ok(AggregateReport {
        entries: entries.len(),
        outputs,
        html,
    })
}

fn log_output(outcome: &OutputOutcome) {
    let path = outcome.path().display().to_string();
    match outcome {
        OutputOutcome::Written { entries, .. } => {
            let count = entries.to_string();
            log_event_with_fields(
                Event::OutputWritten,
                &[("path", path.as_str()), ("entries", count.as_str())],
            );
        }
        OutputOutcome::Skipped { reason, .. } => log_event_with_fields(
            Event::OutputSkipped,
            &[("path", path.as_str()), ("reason", reason.as_str())],
        ),
    }
}

fn log_html(outcome: &HtmlOutcome) {
    match outcome {
        HtmlOutcome::Written { path, rows } => {
            let (path, rows) = (path.display().to_string(), rows.to_string());
            log_event_with_fields(
                Event::HtmlTableWritten,
                &[("path", path.as_str()), ("rows", rows.as_str())],
            );
        }
        HtmlOutcome::Skipped { path, reason } => {
            let path = path.display().to_string();
            log_event_with_fields(
                Event::HtmlTableSkipped,
                &[("path", path.as_str()), ("reason", reason.describe())],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn repo(with_docs: bool) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let sources = dir.path().join("data").join("restaurants");
        fs::create_dir_all(&sources).unwrap();
        fs::write(sources.join("zed.yaml"), "name: Zed's\ntown: Shelbyville\n").unwrap();
        fs::write(sources.join("ana.yaml"), "- name: Ana's Cafe\n  town: Springfield\n").unwrap();
        if with_docs {
            fs::create_dir(dir.path().join("docs")).unwrap();
        }
        let config = Config::default().resolve(dir.path());
        (dir, config)
    }

    #[test]
    fn test_missing_source_dir_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = Config::default().resolve(dir.path());

        let err = run(&config, AggregateOptions::default()).unwrap_err();
        assert!(matches!(err, AggregateError::SourceDirMissing(_)));
        assert!(!config.aggregate_path.exists());
    }

    #[test]
    fn test_run_without_docs_folder() {
        let (_dir, config) = repo(false);

        let report = run(&config, AggregateOptions::default()).unwrap();
        assert_eq!(report.entries, 2);
        assert!(report.outputs[0].is_written());
        assert!(!report.outputs[1].is_written());
        assert!(matches!(
            report.html,
            HtmlOutcome::Skipped { reason: HtmlSkipReason::FileMissing, .. }
        ));

        let lines = report.lines();
        assert_eq!(
            lines[0],
            format!("Wrote 2 entries to {}", config.aggregate_path.display())
        );
        assert!(lines[1].contains("folder not found; skipped writing"));
    }

    #[test]
    fn test_run_writes_both_copies_identically() {
        let (_dir, config) = repo(true);

        let report = run(&config, AggregateOptions::default()).unwrap();
        assert!(report.outputs.iter().all(OutputOutcome::is_written));
        assert_eq!(
            fs::read_to_string(&config.aggregate_path).unwrap(),
            fs::read_to_string(&config.docs_path).unwrap()
        );
    }

    #[test]
    fn test_bad_source_file_writes_nothing() {
        let (_dir, config) = repo(true);
        fs::write(config.source_dir.join("bad.yaml"), "42\n").unwrap();

        let err = run(&config, AggregateOptions::default()).unwrap_err();
        assert!(matches!(err, AggregateError::InvalidShape { .. }));
        assert!(!config.aggregate_path.exists());
        assert!(!config.docs_path.exists());
    }

    #[test]
    fn test_html_disabled() {
        let (dir, config) = repo(true);
        let page = dir.path().join("docs").join("index.html");
        let original = "<!-- restaurants:start --><!-- restaurants:end -->";
        fs::write(&page, original).unwrap();

        let report = run(
            &config,
            AggregateOptions {
                regenerate_html: false,
            },
        )
        .unwrap();
        assert!(matches!(
            report.html,
            HtmlOutcome::Skipped { reason: HtmlSkipReason::Disabled, .. }
        ));
        assert_eq!(fs::read_to_string(Path::new(&page)).unwrap(), original);
    }
}
