//! Structured JSON-lines logger
//!
//! - One log line = one event
//! - `event` first, `severity` second, remaining fields sorted by key
//! - Written to stderr; stdout belongs to command output
//! - Synchronous, no buffering

use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Environment variable holding the minimum severity to emit.
pub const LOG_ENV_VAR: &str = "RESTAURANT_DATA_LOG";

/// Threshold cached on first use. `None` disables logging entirely.
static THRESHOLD: OnceLock<Option<Severity>> = OnceLock::new();

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-file detail
    Trace = 0,
    /// Normal progress
    Info = 1,
    /// Skipped optional work
    Warn = 2,
    /// Run failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Parses a threshold setting.
    ///
    /// Returns `Some(None)` for `off`, `None` for anything unrecognised.
    pub fn parse_threshold(value: &str) -> Option<Option<Severity>> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Some(Severity::Trace)),
            "info" => Some(Some(Severity::Info)),
            "warn" | "warning" => Some(Some(Severity::Warn)),
            "error" => Some(Some(Severity::Error)),
            "off" | "none" => Some(None),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn threshold() -> Option<Severity> {
    *THRESHOLD.get_or_init(|| {
        std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|v| Severity::parse_threshold(&v))
            .unwrap_or(Some(Severity::Warn))
    })
}

/// A structured logger that outputs JSON lines to stderr
pub struct Logger;

impl Logger {
    /// Returns true if events at `severity` pass the configured threshold.
    pub fn enabled(severity: Severity) -> bool {
        threshold().map_or(false, |min| severity >= min)
    }

    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        Self::log_to_writer(severity, event, fields, &mut io::stderr());
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let _ = writer.write_all(render_line(severity, event, fields).as_bytes());
        let _ = writer.flush();
    }

    /// Log at TRACE level
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}

/// Renders one JSON line. serde_json handles string escaping.
fn render_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(128);
    output.push_str("{\"event\":");
    output.push_str(&json_string(event));
    output.push_str(",\"severity\":\"");
    output.push_str(severity.as_str());
    output.push('"');

    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    for (key, value) in sorted {
        output.push(',');
        output.push_str(&json_string(key));
        output.push(':');
        output.push_str(&json_string(value));
    }

    output.push_str("}\n");
    output
}

fn json_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Capture logs to a buffer for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer: Vec<u8> = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
