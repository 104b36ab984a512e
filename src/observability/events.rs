//! Observable events
//!
//! Events are explicit and typed; the string form is what lands in the log.

use std::fmt;

use super::logger::Severity;

/// Observable events across the aggregate and validate pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded and resolved
    ConfigLoaded,

    // Aggregation
    /// Source directory scan begins
    SourceScanStart,
    /// One source file parsed
    SourceFileLoaded,
    /// All entries merged and sorted
    EntriesSorted,
    /// A YAML output was written
    OutputWritten,
    /// An optional YAML output was skipped
    OutputSkipped,
    /// HTML marker region rewritten
    HtmlTableWritten,
    /// HTML regeneration skipped
    HtmlTableSkipped,

    // Validation
    /// Validation of a consolidated file begins
    ValidationStart,
    /// Validation finished (with or without violations)
    ValidationComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SourceScanStart => "SOURCE_SCAN_BEGIN",
            Event::SourceFileLoaded => "SOURCE_FILE_LOADED",
            Event::EntriesSorted => "ENTRIES_SORTED",
            Event::OutputWritten => "OUTPUT_WRITTEN",
            Event::OutputSkipped => "OUTPUT_SKIPPED",
            Event::HtmlTableWritten => "HTML_TABLE_WRITTEN",
            Event::HtmlTableSkipped => "HTML_TABLE_SKIPPED",
            Event::ValidationStart => "VALIDATION_BEGIN",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
        }
    }

    /// Returns true for events that mean optional work did not happen
    pub fn is_skip(&self) -> bool {
        matches!(self, Event::OutputSkipped | Event::HtmlTableSkipped)
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SourceFileLoaded => Severity::Trace,
            e if e.is_skip() => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::SourceScanStart,
            Event::SourceFileLoaded,
            Event::EntriesSorted,
            Event::OutputWritten,
            Event::OutputSkipped,
            Event::HtmlTableWritten,
            Event::HtmlTableSkipped,
            Event::ValidationStart,
            Event::ValidationComplete,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_skip_events() {
        assert!(Event::OutputSkipped.is_skip());
        assert!(Event::HtmlTableSkipped.is_skip());
        assert!(!Event::OutputWritten.is_skip());
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::SourceFileLoaded.severity(), Severity::Trace);
        assert_eq!(Event::HtmlTableSkipped.severity(), Severity::Warn);
        assert_eq!(Event::ValidationComplete.severity(), Severity::Info);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::SourceScanStart), "SOURCE_SCAN_BEGIN");
    }
}
