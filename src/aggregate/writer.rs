//! Consolidated YAML outputs

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use super::errors::{AggregateError, AggregateResult};
use crate::emit::sequence_to_yaml;

/// What happened to one YAML output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputOutcome {
    Written { path: PathBuf, entries: usize },
    Skipped { path: PathBuf, reason: String },
}

impl OutputOutcome {
    pub fn path(&self) -> &Path {
        match self {
            OutputOutcome::Written { path, .. } | OutputOutcome::Skipped { path, .. } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, OutputOutcome::Written { .. })
    }
}

/// Writes `entries` to `path`, creating parent directories.
pub fn write_entries(path: &Path, entries: &[Value]) -> AggregateResult<OutputOutcome> {
    let yaml = sequence_to_yaml(entries).map_err(|source| AggregateError::Emit {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source| AggregateError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, yaml).map_err(write_err)?;

    Ok(OutputOutcome::Written {
        path: path.to_path_buf(),
        entries: entries.len(),
    })
}

/// Writes `entries` only if the parent directory of `path` already exists.
pub fn write_entries_if_dir_exists(
    path: &Path,
    entries: &[Value],
) -> AggregateResult<OutputOutcome> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) if !parent.is_dir() => Ok(OutputOutcome::Skipped {
            path: path.to_path_buf(),
            reason: format!("{} folder not found", parent.display()),
        }),
        _ => write_entries(path, entries),
    }
}
