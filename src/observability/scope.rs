//! Begin/complete logging around one pipeline run
//!
//! `<NAME>_BEGIN` is logged on creation. The scope must then be closed with
//! `complete_with_fields` (`<NAME>_COMPLETE`) or `fail` (`<NAME>_ERROR`);
//! dropping it open logs `<NAME>_ERROR` as well.

use std::time::Instant;

use super::logger::Logger;

/// Brackets a named pipeline run in the log.
///
/// ```ignore
/// let scope = ObservationScope::with_fields("AGGREGATE", &[("source_dir", "data/restaurants")]);
/// scope.complete_with_fields(&[("entries", "42")]);
/// ```
pub struct ObservationScope {
    name: &'static str,
    context: Vec<(&'static str, String)>,
    started: Instant,
    closed: bool,
}

impl ObservationScope {
    /// Opens a scope; `context` is repeated on the closing line.
    pub fn with_fields(name: &'static str, context: &[(&'static str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), context);
        Self {
            name,
            context: context.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            started: Instant::now(),
            closed: false,
        }
    }

    pub fn complete_with_fields(mut self, extra: &[(&str, &str)]) {
        self.close(Outcome::Complete, extra);
    }

    pub fn fail(mut self, reason: &str) {
        self.close(Outcome::Error, &[("reason", reason)]);
    }

    fn close(&mut self, outcome: Outcome, extra: &[(&str, &str)]) {
        self.closed = true;

        let elapsed = self.started.elapsed().as_millis().to_string();
        let mut fields: Vec<(&str, &str)> = self
            .context
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        fields.extend_from_slice(extra);
        fields.push(("elapsed_ms", elapsed.as_str()));

        match outcome {
            Outcome::Complete => Logger::info(&format!("{}_COMPLETE", self.name), &fields),
            Outcome::Error => Logger::error(&format!("{}_ERROR", self.name), &fields),
        }
    }
}

enum Outcome {
    Complete,
    Error,
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.closed {
            self.close(Outcome::Error, &[("reason", "run ended without completing")]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_and_extra_fields() {
        let scope = ObservationScope::with_fields("BUILD", &[("source_dir", "data/restaurants")]);
        assert!(!scope.closed);
        scope.complete_with_fields(&[("entries", "3")]);
    }

    #[test]
    fn test_fail_closes_scope() {
        let scope = ObservationScope::with_fields("BUILD", &[]);
        scope.fail("Source folder not found");
    }

    #[test]
    fn test_drop_while_open() {
        let scope = ObservationScope::with_fields("VALIDATE", &[("path", "data/restaurants.yaml")]);
        drop(scope);
    }
}
