//! Column schemas and the per-row check that turns a raw row into typed values.

use crate::pipeline::parser::RawRow;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

const TRUTHY: &[&str] = &["true", "yes", "y", "1"];
const FALSY: &[&str] = &["false", "no", "n", "0"];

/// How a column's text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// `YYYY-MM-DD`, and a real calendar date.
    Date,
    /// Non-negative finite decimal.
    Number,
    /// Boolean-like spelling, see `TRUTHY` / `FALSY`.
    Flag,
    /// Exactly one of the listed values, case-sensitive.
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub name: &'static str,
    pub required: bool,
    pub kind: ColumnKind,
}

impl ColumnRule {
    pub const fn required(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            required: true,
            kind,
        }
    }

    pub const fn optional(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            required: false,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Date(NaiveDate),
    Number(f64),
    Flag(bool),
}

/// A row that passed its schema. Only columns present in the CSV and known to
/// the schema are kept; required columns are guaranteed to be present.
#[derive(Debug, Default)]
pub struct CheckedRow {
    values: HashMap<&'static str, Value>,
}

impl CheckedRow {
    pub fn text(&self, column: &str) -> Option<String> {
        match self.values.get(column) {
            Some(Value::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        match self.values.get(column) {
            Some(Value::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        match self.values.get(column) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn flag(&self, column: &str) -> Option<bool> {
        match self.values.get(column) {
            Some(Value::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn require_text(&self, column: &str) -> Result<String, String> {
        self.text(column).ok_or_else(|| missing(column))
    }

    pub fn require_date(&self, column: &str) -> Result<NaiveDate, String> {
        self.date(column).ok_or_else(|| missing(column))
    }

    /// Parses an enumerated column into its model type.
    pub fn parsed<T>(&self, column: &str) -> Result<Option<T>, String>
    where
        T: FromStr<Err = String>,
    {
        self.text(column).map(|s| s.parse::<T>()).transpose()
    }

    pub fn require_parsed<T>(&self, column: &str) -> Result<T, String>
    where
        T: FromStr<Err = String>,
    {
        self.parsed(column)?.ok_or_else(|| missing(column))
    }
}

fn missing(column: &str) -> String {
    format!("Missing required field '{}'", column)
}

/// Checks `row` against `rules`, collecting every violation.
///
/// Columns the schema does not know are ignored. Empty cells count as absent.
/// On failure, the violations are joined with `; ` in schema order.
pub fn check_row(rules: &[ColumnRule], row: &RawRow) -> Result<CheckedRow, String> {
    let mut checked = CheckedRow::default();
    let mut problems = Vec::new();

    for rule in rules {
        match row.get(rule.name) {
            None if rule.required => problems.push(missing(rule.name)),
            None => {}
            Some(raw) => match check_value(rule, raw) {
                Ok(value) => {
                    checked.values.insert(rule.name, value);
                }
                Err(problem) => problems.push(problem),
            },
        }
    }

    if problems.is_empty() {
        Ok(checked)
    } else {
        Err(problems.join("; "))
    }
}

fn check_value(rule: &ColumnRule, raw: &str) -> Result<Value, String> {
    match rule.kind {
        ColumnKind::Text => Ok(Value::Text(raw.to_string())),
        ColumnKind::Date => {
            let date = DATE_PATTERN
                .is_match(raw)
                .then(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
                .flatten();
            date.map(Value::Date).ok_or_else(|| {
                format!(
                    "Invalid date '{}' for '{}': expected YYYY-MM-DD",
                    raw, rule.name
                )
            })
        }
        ColumnKind::Number => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(Value::Number(n)),
            _ => Err(format!(
                "Invalid number '{}' for '{}': expected a non-negative decimal",
                raw, rule.name
            )),
        },
        ColumnKind::Flag => {
            let lowered = raw.to_ascii_lowercase();
            if TRUTHY.contains(&lowered.as_str()) {
                Ok(Value::Flag(true))
            } else if FALSY.contains(&lowered.as_str()) {
                Ok(Value::Flag(false))
            } else {
                Err(format!(
                    "Invalid boolean '{}' for '{}': expected one of {}",
                    raw,
                    rule.name,
                    [TRUTHY, FALSY].concat().join(", ")
                ))
            }
        }
        ColumnKind::OneOf(allowed) => {
            if allowed.contains(&raw) {
                Ok(Value::Text(raw.to_string()))
            } else {
                Err(format!(
                    "Invalid value '{}' for '{}': expected one of {}",
                    raw,
                    rule.name,
                    allowed.join(", ")
                ))
            }
        }
    }
}
