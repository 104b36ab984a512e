//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits with status 1.

use std::fmt;
use std::io;

use crate::aggregate::AggregateError;
use crate::config::ConfigError;
use crate::schema::LoadError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error writing command output
    IoError,
    /// Aggregation aborted
    AggregateFailed,
    /// Consolidated file could not be loaded for validation
    ValidateFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "RESTAURANTS_CLI_CONFIG_ERROR",
            Self::IoError => "RESTAURANTS_CLI_IO_ERROR",
            Self::AggregateFailed => "RESTAURANTS_CLI_AGGREGATE_FAILED",
            Self::ValidateFailed => "RESTAURANTS_CLI_VALIDATE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::new(CliErrorCode::IoError, e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(CliErrorCode::ConfigError, e.to_string())
    }
}

impl From<AggregateError> for CliError {
    fn from(e: AggregateError) -> Self {
        Self::new(CliErrorCode::AggregateFailed, e.to_string())
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        Self::new(CliErrorCode::ValidateFailed, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
