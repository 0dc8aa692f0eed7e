#![forbid(unsafe_code)]

//! Rule parameter coercion
//!
//! Parameters are written as text in rule tags. The type they are coerced to
//! depends on both the rule kind and the category of the field it is applied
//! to: `min=3` is an `i64` on a signed field and an `f64` on a float field.
//! Fields stored as `f32` get `f32` parameters.

use crate::error::RuleError;
use crate::rules::grammar::ConstraintKind;
use crate::types::ValueCategory;
use regex::Regex;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Shape of the parameter a rule kind expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Bare keyword, no parameter
    None,
    /// Numeric bound typed by the field's category
    Bound,
    /// Non-negative character count
    Length,
    /// Regular expression
    Pattern,
    /// Comma-separated strings
    StringSet,
    /// Comma-separated elements typed by the list's element type
    ElementSet,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::None => "none",
            ParamKind::Bound => "number",
            ParamKind::Length => "count",
            ParamKind::Pattern => "regex",
            ParamKind::StringSet => "string list",
            ParamKind::ElementSet => "element list",
        }
    }
}

/// What a parameter is coerced for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Category of the field the rule is applied to
    pub category: ValueCategory,

    /// Float fields stored as `f32`
    pub single_precision: bool,
}

impl From<ValueCategory> for Target {
    fn from(category: ValueCategory) -> Self {
        Target {
            category,
            single_precision: false,
        }
    }
}

/// A coerced rule parameter
#[derive(Debug, Clone)]
pub enum Param {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Float32(f32),
    Length(usize),
    Pattern(Regex),
    Strings(Vec<String>),
    SignedSet(Vec<i64>),
    UnsignedSet(Vec<u64>),
    FloatSet(Vec<f64>),
    Float32Set(Vec<f32>),
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Param::Signed(a), Param::Signed(b)) => a == b,
            (Param::Unsigned(a), Param::Unsigned(b)) => a == b,
            (Param::Float(a), Param::Float(b)) => a == b,
            (Param::Float32(a), Param::Float32(b)) => a == b,
            (Param::Length(a), Param::Length(b)) => a == b,
            (Param::Pattern(a), Param::Pattern(b)) => a.as_str() == b.as_str(),
            (Param::Strings(a), Param::Strings(b)) => a == b,
            (Param::SignedSet(a), Param::SignedSet(b)) => a == b,
            (Param::UnsignedSet(a), Param::UnsignedSet(b)) => a == b,
            (Param::FloatSet(a), Param::FloatSet(b)) => a == b,
            (Param::Float32Set(a), Param::Float32Set(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Signed(v) => write!(f, "{}", v),
            Param::Unsigned(v) => write!(f, "{}", v),
            Param::Float(v) => write!(f, "{}", v),
            Param::Float32(v) => write!(f, "{}", v),
            Param::Length(v) => write!(f, "{}", v),
            Param::Pattern(re) => f.write_str(re.as_str()),
            Param::Strings(items) => f.write_str(&items.join(",")),
            Param::SignedSet(items) => write_joined(f, items),
            Param::UnsignedSet(items) => write_joined(f, items),
            Param::FloatSet(items) => write_joined(f, items),
            Param::Float32Set(items) => write_joined(f, items),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Serialize for Param {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Param::Signed(v) => serializer.serialize_i64(*v),
            Param::Unsigned(v) => serializer.serialize_u64(*v),
            Param::Float(v) => serializer.serialize_f64(*v),
            Param::Float32(v) => serializer.serialize_f32(*v),
            Param::Length(v) => serializer.serialize_u64(*v as u64),
            Param::Pattern(re) => serializer.serialize_str(re.as_str()),
            Param::Strings(items) => serialize_items(serializer, items),
            Param::SignedSet(items) => serialize_items(serializer, items),
            Param::UnsignedSet(items) => serialize_items(serializer, items),
            Param::FloatSet(items) => serialize_items(serializer, items),
            Param::Float32Set(items) => serialize_items(serializer, items),
        }
    }
}

fn serialize_items<S: Serializer, T: Serialize>(
    serializer: S,
    items: &[T],
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(items.len()))?;
    for item in items {
        seq.serialize_element(item)?;
    }
    seq.end()
}

/// Coerces a raw parameter for `kind` on a field of `target`'s category
///
/// Bounds and element sets for single-precision fields are parsed as `f32`,
/// the same rounding the field's own values went through.
///
/// # Errors
///
/// Returns `RuleError::InvalidParameter` when the text does not parse as the
/// expected type, `RuleError::InvalidPattern` for a bad regular expression and
/// `RuleError::Inapplicable` when `kind` has no meaning for `category`.
pub fn coerce(
    kind: ConstraintKind,
    target: impl Into<Target>,
    raw: &str,
) -> Result<Param, RuleError> {
    let keyword = kind.keyword();
    let Target {
        category,
        single_precision,
    } = target.into();

    match (kind.param_kind(), category) {
        (ParamKind::Bound, ValueCategory::Signed) => {
            parse_scalar(keyword, raw, "a signed integer").map(Param::Signed)
        }
        (ParamKind::Bound, ValueCategory::Unsigned) => {
            parse_scalar(keyword, raw, "an unsigned integer").map(Param::Unsigned)
        }
        (ParamKind::Bound, ValueCategory::Float) if single_precision => {
            parse_scalar(keyword, raw, "a number").map(Param::Float32)
        }
        (ParamKind::Bound, ValueCategory::Float) => {
            parse_scalar(keyword, raw, "a number").map(Param::Float)
        }
        (ParamKind::Length, ValueCategory::String) => {
            parse_scalar(keyword, raw, "a non-negative integer").map(Param::Length)
        }
        (ParamKind::Pattern, ValueCategory::String) => Regex::new(raw)
            .map(Param::Pattern)
            .map_err(|e| RuleError::InvalidPattern {
                pattern: raw.to_string(),
                message: e.to_string(),
            }),
        (ParamKind::StringSet, ValueCategory::String)
        | (ParamKind::ElementSet, ValueCategory::StringList) => Ok(Param::Strings(
            split_list(raw).map(str::to_string).collect(),
        )),
        (ParamKind::ElementSet, ValueCategory::SignedList) => {
            parse_list(keyword, raw, "a list of signed integers").map(Param::SignedSet)
        }
        (ParamKind::ElementSet, ValueCategory::UnsignedList) => {
            parse_list(keyword, raw, "a list of unsigned integers").map(Param::UnsignedSet)
        }
        (ParamKind::ElementSet, ValueCategory::FloatList) if single_precision => {
            parse_list(keyword, raw, "a list of numbers").map(Param::Float32Set)
        }
        (ParamKind::ElementSet, ValueCategory::FloatList) => {
            parse_list(keyword, raw, "a list of numbers").map(Param::FloatSet)
        }
        _ => Err(RuleError::Inapplicable {
            keyword: keyword.to_string(),
            category,
        }),
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim)
}

fn parse_scalar<T: FromStr>(keyword: &str, raw: &str, expected: &'static str) -> Result<T, RuleError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(keyword, raw, expected))
}

fn parse_list<T: FromStr>(keyword: &str, raw: &str, expected: &'static str) -> Result<Vec<T>, RuleError> {
    split_list(raw)
        .map(|item| item.parse().map_err(|_| invalid(keyword, raw, expected)))
        .collect()
}

fn invalid(keyword: &str, raw: &str, expected: &'static str) -> RuleError {
    RuleError::InvalidParameter {
        keyword: keyword.to_string(),
        value: raw.to_string(),
        expected,
    }
}
