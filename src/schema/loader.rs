//! Loads a consolidated file for validation.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use super::errors::{LoadError, LoadResult};
use crate::emit::type_name;

/// Reads `path` and returns its top-level sequence.
///
/// Unreadable, unparsable, or non-sequence files are fatal.
pub fn load_entries_file(path: &Path) -> LoadResult<Vec<Value>> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_yaml::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Sequence(entries) => Ok(entries),
        other => Err(LoadError::NotASequence {
            path: path.to_path_buf(),
            found: type_name(&other),
        }),
    }
}
