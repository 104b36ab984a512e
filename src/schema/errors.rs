//! Violation and load error types
//!
//! Two classes:
//! - `Violation`: a content problem in one record. Collected and reported.
//! - `LoadError`: the file itself is unusable. Fatal.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// What kind of rule a violation broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The element is not a mapping; no field checks ran
    NotAMapping,
    /// A required key (or nested key) is absent
    MissingField,
    /// A present value has the wrong type, shape, or content
    InvalidValue,
}

/// A single reported failure of a record to satisfy a schema rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    index: usize,
    name: Option<String>,
    kind: ViolationKind,
    field: Option<String>,
    message: String,
}

impl Violation {
    pub fn not_a_mapping(index: usize) -> Self {
        Self {
            index,
            name: None,
            kind: ViolationKind::NotAMapping,
            field: None,
            message: "must be a mapping".into(),
        }
    }

    pub fn missing(
        index: usize,
        name: Option<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            index,
            name,
            kind: ViolationKind::MissingField,
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn invalid(
        index: usize,
        name: Option<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            index,
            name,
            kind: ViolationKind::InvalidValue,
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// The record's `name`, if it had one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Field path, e.g. `hours.mon` or `sources[1]`
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::NotAMapping => write!(f, "entry[{}]: {}", self.index, self.message),
            _ => write!(
                f,
                "entry[{}] ({}): {}",
                self.index,
                self.name.as_deref().unwrap_or("unnamed"),
                self.message
            ),
        }
    }
}

/// Fatal errors loading a consolidated file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Top-level YAML must be a list of restaurant entries (found {found} in {})", .path.display())]
    NotASequence { path: PathBuf, found: &'static str },
}

pub type LoadResult<T> = Result<T, LoadError>;
