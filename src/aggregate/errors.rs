//! Aggregation errors
//!
//! Every variant is fatal: the run stops at the first one. Outputs written
//! before the failure are left in place.

use std::path::PathBuf;

use thiserror::Error;

use crate::emit::EmitError;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Source folder not found: {}", .0.display())]
    SourceDirMissing(PathBuf),

    #[error("Failed to list {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    ParseSource {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{} must contain a mapping or list of mappings (found {found})", .path.display())]
    InvalidShape { path: PathBuf, found: &'static str },

    #[error("Failed to serialize entries for {}: {source}", .path.display())]
    Emit {
        path: PathBuf,
        #[source]
        source: EmitError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type AggregateResult<T> = Result<T, AggregateError>;
