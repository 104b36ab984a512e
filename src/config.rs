//! Path configuration for both pipelines
//!
//! Every field has a repository-relative default, so running without a
//! config file uses the fixed layout:
//!
//! ```text
//! data/restaurants/*.yaml   -> data/restaurants.yaml
//!                           -> docs/restaurants.yaml (if docs/ exists)
//!                           -> docs/index.html marker region (if present)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors. All are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration file structure (JSON)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of per-restaurant source files
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Canonical consolidated output, always written
    #[serde(default = "default_aggregate_path")]
    pub aggregate_path: PathBuf,

    /// Documentation-site copy, written only if its directory exists
    #[serde(default = "default_docs_path")]
    pub docs_path: PathBuf,

    /// Static page holding the restaurant table marker region
    #[serde(default = "default_html_path")]
    pub html_path: PathBuf,

    /// Source file extensions, without the leading dot
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    #[serde(default = "default_html_start_marker")]
    pub html_start_marker: String,

    #[serde(default = "default_html_end_marker")]
    pub html_end_marker: String,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("data").join("restaurants")
}
fn default_aggregate_path() -> PathBuf {
    PathBuf::from("data").join("restaurants.yaml")
}
fn default_docs_path() -> PathBuf {
    PathBuf::from("docs").join("restaurants.yaml")
}
fn default_html_path() -> PathBuf {
    PathBuf::from("docs").join("index.html")
}
fn default_source_extensions() -> Vec<String> {
    vec!["yaml".to_string()]
}
fn default_html_start_marker() -> String {
    "<!-- restaurants:start -->".to_string()
}
fn default_html_end_marker() -> String {
    "<!-- restaurants:end -->".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            aggregate_path: default_aggregate_path(),
            docs_path: default_docs_path(),
            html_path: default_html_path(),
            source_extensions: default_source_extensions(),
            html_start_marker: default_html_start_marker(),
            html_end_marker: default_html_end_marker(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.source_extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "source_extensions must not be empty".into(),
            ));
        }

        for ext in &self.source_extensions {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::Invalid(format!(
                    "source extension '{}' must be non-empty and given without a leading dot",
                    ext
                )));
            }
        }

        if self.html_start_marker.is_empty() || self.html_end_marker.is_empty() {
            return Err(ConfigError::Invalid("HTML markers must not be empty".into()));
        }

        if self.html_start_marker == self.html_end_marker {
            return Err(ConfigError::Invalid(
                "html_start_marker and html_end_marker must differ".into(),
            ));
        }

        Ok(())
    }

    /// Joins every relative path onto `root`. Absolute paths are kept.
    pub fn resolve(mut self, root: &Path) -> Self {
        for path in [
            &mut self.source_dir,
            &mut self.aggregate_path,
            &mut self.docs_path,
            &mut self.html_path,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        self
    }
}
