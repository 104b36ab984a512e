//! restaurant-data - aggregate per-restaurant YAML records and validate
//! the consolidated dataset.
//!
//! Two independent batch pipelines:
//! - [`aggregate`]: source directory -> sorted sequence -> YAML outputs
//!   (plus an optional HTML table)
//! - [`schema`]: consolidated file -> every violation of the record schema

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod emit;
pub mod observability;
pub mod schema;
