//! Restaurant record schema validation
//!
//! # Design Principles
//!
//! - Checks are pure functions from record to violations, independent of I/O
//! - Every rule runs; one record can produce many violations
//! - Violations are values, never errors; only a malformed file is fatal
//! - Output order = record order, then rule order within a record

mod errors;
mod loader;
mod rules;
mod validator;

pub use errors::{LoadError, LoadResult, Violation, ViolationKind};
pub use loader::load_entries_file;
pub use rules::{
    date_pattern, hour_pattern, DAYS, DIETARY_KEYS, ORDERING_VALUES, PRICE_VALUES,
    REQUIRED_FIELDS,
};
pub use validator::{validate_entries, validate_entry, ValidationReport};
