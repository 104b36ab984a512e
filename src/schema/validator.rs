//! Record validator
//!
//! Rule order within a record:
//! 1. required fields (one violation per missing key, in field order)
//! 2. price
//! 3. ordering
//! 4. dietary
//! 5. hours
//! 6. highlight_items
//! 7. last_verified
//! 8. sources
//! 9. comments (optional)
//!
//! Each rule only runs if its key is present; a missing key has already been
//! reported by step 1. No rule short-circuits another.

use chrono::{Datelike, NaiveDate};
use serde_yaml::{Mapping, Value};

use super::errors::Violation;
use super::rules::{
    date_pattern, hour_pattern, DAYS, DIETARY_KEYS, ORDERING_VALUES, PRICE_VALUES,
    REQUIRED_FIELDS,
};

/// Outcome of validating a whole consolidated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    record_count: usize,
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Lines to print: every violation, or a single success line.
    pub fn lines(&self) -> Vec<String> {
        if self.is_valid() {
            vec![format!("OK: {} entries validated", self.record_count)]
        } else {
            self.violations.iter().map(ToString::to_string).collect()
        }
    }

    /// Process exit status: non-zero iff any violation was reported.
    pub fn exit_status(&self) -> i32 {
        if self.is_valid() {
            0
        } else {
            1
        }
    }
}

/// Validates every element of a consolidated sequence.
pub fn validate_entries(entries: &[Value]) -> ValidationReport {
    let violations = entries
        .iter()
        .enumerate()
        .flat_map(|(index, entry)| validate_entry(index, entry))
        .collect();

    ValidationReport {
        record_count: entries.len(),
        violations,
    }
}

/// Validates one element. Non-mappings yield a single structural violation.
pub fn validate_entry(index: usize, entry: &Value) -> Vec<Violation> {
    let Some(record) = entry.as_mapping() else {
        return vec![Violation::not_a_mapping(index)];
    };

    let mut check = RecordCheck {
        index,
        name: record.get("name").map(describe),
        record,
        violations: Vec::new(),
    };

    check.required_fields();
    check.price();
    check.ordering();
    check.dietary();
    check.hours();
    check.highlight_items();
    check.last_verified();
    check.sources();
    check.comments();

    check.violations
}

/// Accumulates violations for one mapping record.
struct RecordCheck<'a> {
    index: usize,
    name: Option<String>,
    record: &'a Mapping,
    violations: Vec<Violation>,
}

impl<'a> RecordCheck<'a> {
    /// The record itself, detached from the borrow of `self`.
    fn record(&self) -> &'a Mapping {
        self.record
    }

    fn missing(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations
            .push(Violation::missing(self.index, self.name.clone(), field, message));
    }

    fn invalid(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations
            .push(Violation::invalid(self.index, self.name.clone(), field, message));
    }

    fn required_fields(&mut self) {
        for field in REQUIRED_FIELDS {
            if !self.record.contains_key(field) {
                self.missing(field, format!("missing field `{}`", field));
            }
        }
    }

    fn price(&mut self) {
        let Some(price) = self.record().get("price") else {
            return;
        };
        let ok = price.as_str().map_or(false, |p| PRICE_VALUES.contains(&p));
        if !ok {
            self.invalid(
                "price",
                format!(
                    "price must be one of {} (got `{}`)",
                    PRICE_VALUES.join(", "),
                    describe(price)
                ),
            );
        }
    }

    fn ordering(&mut self) {
        let Some(ordering) = self.record().get("ordering") else {
            return;
        };
        let items = match ordering.as_sequence() {
            Some(items) if !items.is_empty() => items,
            _ => {
                self.invalid("ordering", "ordering must be a non-empty list");
                return;
            }
        };

        let bad: Vec<String> = items
            .iter()
            .filter(|o| !o.as_str().map_or(false, |s| ORDERING_VALUES.contains(&s)))
            .map(describe)
            .collect();

        if !bad.is_empty() {
            self.invalid(
                "ordering",
                format!(
                    "invalid ordering values [{}]; allowed {}",
                    bad.join(", "),
                    ORDERING_VALUES.join(", ")
                ),
            );
        }
    }

    fn dietary(&mut self) {
        let Some(dietary) = self.record().get("dietary") else {
            return;
        };
        let Some(dietary) = dietary.as_mapping() else {
            self.invalid("dietary", "dietary must be a mapping");
            return;
        };

        for key in DIETARY_KEYS {
            let field = format!("dietary.{}", key);
            match dietary.get(key) {
                None => self.missing(field, format!("dietary missing `{}`", key)),
                Some(Value::Bool(_)) => {}
                Some(_) => self.invalid(field, format!("dietary `{}` must be boolean", key)),
            }
        }
    }

    fn hours(&mut self) {
        let Some(hours) = self.record().get("hours") else {
            return;
        };
        let Some(hours) = hours.as_mapping() else {
            self.invalid("hours", "hours must be a mapping");
            return;
        };

        for day in DAYS {
            let field = format!("hours.{}", day);
            match hours.get(day) {
                None => self.missing(field, format!("hours missing `{}`", day)),
                Some(value) => {
                    let ok = value.as_str().map_or(false, |s| hour_pattern().is_match(s));
                    if !ok {
                        self.invalid(
                            field,
                            format!(
                                "hours for `{}` must match HH:MM-HH:MM or `closed` (got `{}`)",
                                day,
                                describe(value)
                            ),
                        );
                    }
                }
            }
        }
    }

    fn highlight_items(&mut self) {
        let Some(items) = self.record().get("highlight_items") else {
            return;
        };
        let Some(items) = items.as_sequence() else {
            self.invalid("highlight_items", "highlight_items must be a list");
            return;
        };

        for (i, item) in items.iter().enumerate() {
            let field = format!("highlight_items[{}]", i);
            match item.as_mapping() {
                None => self.invalid(field, "highlight_items entries must be mappings"),
                Some(m) if !(m.contains_key("item") && m.contains_key("note")) => self.missing(
                    field,
                    "highlight_items entries must include `item` and `note`",
                ),
                Some(_) => {}
            }
        }
    }

    fn last_verified(&mut self) {
        let Some(value) = self.record().get("last_verified") else {
            return;
        };
        let text = describe(value);

        if value.as_str().is_none() || !date_pattern().is_match(&text) {
            self.invalid(
                "last_verified",
                format!("last_verified must be YYYY-MM-DD (got `{}`)", text),
            );
        } else if !is_calendar_date(&text) {
            self.invalid(
                "last_verified",
                format!("last_verified is not a valid date ({})", text),
            );
        }
    }

    fn sources(&mut self) {
        let Some(sources) = self.record().get("sources") else {
            return;
        };
        let sources = match sources.as_sequence() {
            Some(s) if !s.is_empty() => s,
            _ => {
                self.invalid("sources", "sources must be a non-empty list");
                return;
            }
        };

        for (i, source) in sources.iter().enumerate() {
            let field = format!("sources[{}]", i);
            match source.as_mapping() {
                None => self.invalid(
                    field,
                    "each source must be a mapping with `type` and `detail`",
                ),
                Some(m) if !(m.contains_key("type") && m.contains_key("detail")) => {
                    self.missing(field, "each source needs `type` and `detail`")
                }
                Some(_) => {}
            }
        }
    }

    fn comments(&mut self) {
        let Some(comments) = self.record().get("comments") else {
            return;
        };
        let Some(comments) = comments.as_sequence() else {
            self.invalid("comments", "comments must be a list of strings");
            return;
        };

        for (i, comment) in comments.iter().enumerate() {
            if !comment.is_string() {
                self.invalid(format!("comments[{}]", i), "each comment must be a string");
            }
        }
    }
}

/// Real date with a year of at least 1.
fn is_calendar_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_or(false, |d| d.year() >= 1)
}

/// Short text form of a value for messages.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Sequence(_) => "sequence".to_string(),
        Value::Mapping(_) => "mapping".to_string(),
        Value::Tagged(t) => format!("{} {}", t.tag, describe(&t.value)),
    }
}
