//! Restaurant table regeneration inside a static page
//!
//! Only the text between the start and end markers is replaced. The markers
//! and everything outside them are kept byte for byte.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

const COLUMNS: [(&str, &str); 6] = [
    ("name", "Name"),
    ("town", "Town"),
    ("neighborhood", "Neighborhood"),
    ("categories", "Categories"),
    ("cuisine", "Cuisine"),
    ("price", "Price"),
];

/// Why the table was not regenerated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlSkipReason {
    Disabled,
    FileMissing,
    MarkersMissing,
    MarkersOutOfOrder,
    /// The page exists but could not be read as UTF-8 text
    Unreadable,
    /// The updated page could not be written back
    Unwritable,
}

impl HtmlSkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            HtmlSkipReason::Disabled => "table regeneration disabled",
            HtmlSkipReason::FileMissing => "file not found",
            HtmlSkipReason::MarkersMissing => "table markers not found",
            HtmlSkipReason::MarkersOutOfOrder => "end marker precedes start marker",
            HtmlSkipReason::Unreadable => "page could not be read as UTF-8",
            HtmlSkipReason::Unwritable => "page could not be written",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlOutcome {
    Written { path: PathBuf, rows: usize },
    Skipped { path: PathBuf, reason: HtmlSkipReason },
}

/// Escapes `& < > " '` for text and attribute content.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Text shown in a cell. Sequences are comma-joined; missing, null and
/// mapping values render empty.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Mapping(_)) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| cell_text(Some(item)))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::Tagged(tagged)) => cell_text(Some(&tagged.value)),
    }
}

/// Renders the full table for `entries`, ending in a newline.
pub fn render_table(entries: &[Value]) -> String {
    let mut out = String::from("<table class=\"restaurants\">\n  <thead>\n    <tr>");
    for (_, heading) in COLUMNS {
        out.push_str("<th>");
        out.push_str(heading);
        out.push_str("</th>");
    }
    out.push_str("</tr>\n  </thead>\n  <tbody>\n");

    for entry in entries {
        out.push_str("    <tr>");
        for (key, _) in COLUMNS {
            out.push_str("<td>");
            out.push_str(&escape_html(&cell_text(entry.get(key))));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }

    out.push_str("  </tbody>\n</table>\n");
    out
}

/// Replaces the text between `start` and `end` with `body`.
pub fn splice_region(
    document: &str,
    start: &str,
    end: &str,
    body: &str,
) -> Result<String, HtmlSkipReason> {
    let start_at = document.find(start).ok_or(HtmlSkipReason::MarkersMissing)?;
    let content_at = start_at + start.len();
    let end_at = match document[content_at..].find(end) {
        Some(offset) => content_at + offset,
        None if document.contains(end) => return Err(HtmlSkipReason::MarkersOutOfOrder),
        None => return Err(HtmlSkipReason::MarkersMissing),
    };

    let mut out = String::with_capacity(document.len() + body.len());
    out.push_str(&document[..content_at]);
    out.push('\n');
    out.push_str(body);
    out.push_str(&document[end_at..]);
    Ok(out)
}

/// Rewrites the marker region of `path` with a table of `entries`.
///
/// Never fails the run: a missing or unreadable page, missing markers, or a
/// failed write all come back as `HtmlOutcome::Skipped`.
pub fn regenerate_table(path: &Path, entries: &[Value], start: &str, end: &str) -> HtmlOutcome {
    let skipped = |reason| HtmlOutcome::Skipped {
        path: path.to_path_buf(),
        reason,
    };

    if !path.is_file() {
        return skipped(HtmlSkipReason::FileMissing);
    }

    let Ok(document) = fs::read_to_string(path) else {
        return skipped(HtmlSkipReason::Unreadable);
    };

    let updated = match splice_region(&document, start, end, &render_table(entries)) {
        Ok(updated) => updated,
        Err(reason) => return skipped(reason),
    };

    if fs::write(path, updated).is_err() {
        return skipped(HtmlSkipReason::Unwritable);
    }

    HtmlOutcome::Written {
        path: path.to_path_buf(),
        rows: entries.len(),
    }
}
