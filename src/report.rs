#![forbid(unsafe_code)]

//! Validation report model
//!
//! A report lists every field that failed at least one rule, in declaration
//! order. An empty report is never built: a record without violations
//! validates to `None`, so callers only need a presence check.

use crate::record::FieldValue;
use crate::rules::{ConstraintKind, Param};
use serde::Serialize;
use std::fmt;

const FIELD_PREFIX: &str = "field: ";
const RECORD_PREFIX: &str = "record: ";
const VALUE_PREFIX: &str = "value: ";
const VIOLATIONS_PREFIX: &str = "violations: ";
const KIND_PREFIX: &str = "kind: ";
const PARAM_SEPARATOR: &str = ", param: ";
const VIOLATION_SEPARATOR: &str = " | ";

/// A rule the field's value failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub kind: ConstraintKind,

    /// The coerced rule parameter, if the rule takes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Param>,
}

impl Violation {
    pub fn new(kind: ConstraintKind, parameter: Option<Param>) -> Self {
        Violation { kind, parameter }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", KIND_PREFIX, self.kind)?;
        if let Some(parameter) = &self.parameter {
            write!(f, "{}{}", PARAM_SEPARATOR, parameter)?;
        }
        Ok(())
    }
}

/// Violations found on one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    /// Field name after the naming convention was applied
    pub field: String,

    /// The extracted value; absent when an optional field was empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,

    /// Name of the record that declares the field
    pub record: String,

    /// Failed rules in evaluation order, never empty
    pub violations: Vec<Violation>,
}

impl FieldReport {
    /// Returns true if a violation of `kind` was recorded
    pub fn has(&self, kind: ConstraintKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }
}

/// Every field that failed validation in one call
///
/// Only built through [`ValidationReport::from_fields`], so a report always
/// holds at least one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    fields_errors: Vec<FieldReport>,
}

impl ValidationReport {
    /// Builds a report, or `None` when there is nothing to report
    pub fn from_fields(fields_errors: Vec<FieldReport>) -> Option<Self> {
        if fields_errors.is_empty() {
            None
        } else {
            Some(ValidationReport { fields_errors })
        }
    }

    /// Failing fields in report order
    pub fn fields_errors(&self) -> &[FieldReport] {
        &self.fields_errors
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.fields_errors.len()
    }

    /// Always false; empty reports are represented as `None`
    pub fn is_empty(&self) -> bool {
        self.fields_errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields_errors.iter()
    }

    /// First report for the field reported as `name`
    pub fn field(&self, name: &str) -> Option<&FieldReport> {
        self.fields_errors.iter().find(|f| f.field == name)
    }

    /// All (field, rule keyword) pairs in report order
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.fields_errors
            .iter()
            .flat_map(|f| {
                f.violations
                    .iter()
                    .map(move |v| (f.field.clone(), v.kind.keyword().to_string()))
            })
            .collect()
    }

    /// Renders the report as text, one block per field
    ///
    /// Names, values and parameters are escaped so each entry stays on its
    /// line: backslash, newline, carriage return and `|` are written as
    /// `\\`, `\n`, `\r` and `\|`.
    ///
    /// ```text
    /// field: name
    /// record: User
    /// value: cc
    /// violations: kind: minLength, param: 3 | kind: alpha
    /// ```
    pub fn render(&self) -> String {
        let mut output = String::new();

        for (i, field) in self.fields_errors.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&format!("{}{}\n", FIELD_PREFIX, escape(&field.field)));
            output.push_str(&format!("{}{}\n", RECORD_PREFIX, escape(&field.record)));
            match &field.value {
                Some(value) => {
                    output.push_str(&format!("{}{}\n", VALUE_PREFIX, escape(&value.to_string())))
                }
                None => output.push_str(&format!("{}<absent>\n", VALUE_PREFIX)),
            }

            let violations: Vec<String> = field.violations.iter().map(render_violation).collect();
            output.push_str(&format!(
                "{}{}\n",
                VIOLATIONS_PREFIX,
                violations.join(VIOLATION_SEPARATOR)
            ));
        }

        output
    }

    /// Recovers the (field, rule keyword) pairs from [`ValidationReport::render`] output
    pub fn parse_rendered(text: &str) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            if let Some(field) = line.strip_prefix(FIELD_PREFIX) {
                current = Some(unescape(field));
            } else if let Some(violations) = line.strip_prefix(VIOLATIONS_PREFIX)
                && let Some(field) = &current
            {
                for violation in violations.split(VIOLATION_SEPARATOR) {
                    let Some(rest) = violation.strip_prefix(KIND_PREFIX) else {
                        continue;
                    };
                    let kind = rest.split(PARAM_SEPARATOR).next().unwrap_or(rest);
                    pairs.push((field.clone(), kind.to_string()));
                }
            }
        }

        pairs
    }
}

fn render_violation(violation: &Violation) -> String {
    match &violation.parameter {
        Some(parameter) => format!(
            "{}{}{}{}",
            KIND_PREFIX,
            violation.kind,
            PARAM_SEPARATOR,
            escape(&parameter.to_string())
        ),
        None => format!("{}{}", KIND_PREFIX, violation.kind),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '|' => out.push_str("\\|"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
