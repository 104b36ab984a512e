//! Block-style YAML emitter with ASCII-only output
//!
//! Layout follows the common `safe_dump` shape: sequences nested under a
//! mapping key are not indented, mapping values under a `- ` item continue
//! on the item's column. Key order is the mapping's insertion order.
//!
//! Any string that contains non-printable or non-ASCII characters, or that
//! would read back as something other than the same string, is written
//! double-quoted with escapes (`\xNN`, `\uNNNN`, `\UNNNNNNNN`). Everything
//! the emitter writes parses back to an equal `serde_yaml::Value`.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;
use serde_yaml::Value;
use thiserror::Error;

const INDENT: usize = 2;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("mapping keys must be scalars (found {0})")]
    UnsupportedKey(&'static str),

    #[error("tagged values are not supported (tag {0})")]
    TaggedValue(String),
}

pub type EmitResult<T> = Result<T, EmitError>;

/// Serializes a sequence of records as a complete YAML document.
pub fn sequence_to_yaml(items: &[Value]) -> EmitResult<String> {
    if items.is_empty() {
        return Ok("[]\n".to_string());
    }
    let mut out = String::new();
    write_sequence(&mut out, items, 0, false)?;
    Ok(out)
}

/// Name of the value's kind, for diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

fn write_sequence(
    out: &mut String,
    seq: &[Value],
    indent: usize,
    first_inline: bool,
) -> EmitResult<()> {
    for (i, item) in seq.iter().enumerate() {
        if i > 0 || !first_inline {
            pad(out, indent);
        }
        out.push_str("- ");
        match item {
            Value::Mapping(map) if !map.is_empty() => {
                write_mapping(out, map, indent + INDENT, true)?;
            }
            Value::Sequence(inner) if !inner.is_empty() => {
                write_sequence(out, inner, indent + INDENT, true)?;
            }
            other => {
                out.push_str(&inline_value(other)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

fn write_mapping(
    out: &mut String,
    map: &serde_yaml::Mapping,
    indent: usize,
    first_inline: bool,
) -> EmitResult<()> {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 || !first_inline {
            pad(out, indent);
        }
        out.push_str(&key_scalar(key)?);
        out.push(':');
        match value {
            Value::Mapping(inner) if !inner.is_empty() => {
                out.push('\n');
                write_mapping(out, inner, indent + INDENT, false)?;
            }
            Value::Sequence(seq) if !seq.is_empty() => {
                out.push('\n');
                write_sequence(out, seq, indent, false)?;
            }
            other => {
                out.push(' ');
                out.push_str(&inline_value(other)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

fn key_scalar(key: &Value) -> EmitResult<String> {
    match key {
        Value::Sequence(_) | Value::Mapping(_) => Err(EmitError::UnsupportedKey(type_name(key))),
        other => inline_value(other),
    }
}

/// Renders scalars and empty collections on one line.
fn inline_value(value: &Value) -> EmitResult<String> {
    Ok(match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_scalar(s),
        Value::Sequence(_) => "[]".to_string(),
        Value::Mapping(_) => "{}".to_string(),
        Value::Tagged(tagged) => return Err(EmitError::TaggedValue(tagged.tag.to_string())),
    })
}

fn string_scalar(s: &str) -> String {
    if needs_quotes(s) {
        double_quoted(s)
    } else {
        s.to_string()
    }
}

/// Strings older YAML 1.1 readers would resolve to a non-string type.
fn yaml11_implicit() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?:[yYnN]|[Yy]es|YES|[Nn]o|NO|[Oo]n|ON|[Oo]ff|OFF|~",
            r"|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+(?:\.[0-9_]*)?",
            r"|[-+]?[0-9][0-9_]*_[0-9_]*",
            r"|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt ].*)?)$"
        ))
        .expect("static pattern")
    })
}

fn needs_quotes(s: &str) -> bool {
    if s.is_empty() || s.starts_with(' ') || s.ends_with(' ') {
        return true;
    }
    if !s.chars().all(|c| (' '..='~').contains(&c)) {
        return true;
    }
    if yaml11_implicit().is_match(s) {
        return true;
    }
    // Whatever the plain form reads back as must be this exact string.
    !matches!(serde_yaml::from_str::<Value>(s), Ok(Value::String(ref back)) if back == s)
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            ' '..='~' => out.push(c),
            c if (c as u32) <= 0xFF => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c if (c as u32) <= 0xFFFF => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08X}", c as u32);
            }
        }
    }
    out.push('"');
    out
}
