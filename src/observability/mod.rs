//! Observability for the aggregate and validate pipelines
//!
//! - Structured JSON-lines logging on stderr
//! - Typed events
//! - Begin/complete scopes
//!
//! Observability is read-only: it never changes a run's outcome or its
//! stdout output.
//!
//! ```ignore
//! use restaurant_data::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::OutputWritten, &[("path", "data/restaurants.yaml")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity, LOG_ENV_VAR};
pub use scope::ObservationScope;

/// Log a pipeline event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a pipeline event with fields, at the event's own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let name = event.as_str();
    match event.severity() {
        Severity::Trace => Logger::trace(name, fields),
        Severity::Info => Logger::info(name, fields),
        Severity::Warn => Logger::warn(name, fields),
        Severity::Error => Logger::error(name, fields),
    }
}
