#![forbid(unsafe_code)]

//! Record schema files
//!
//! A schema describes the fields of a record whose values arrive at runtime
//! as JSON documents. Each field names a type, and optionally a rule tag and
//! the key it is serialized under:
//!
//! ```toml
//! name = "User"
//!
//! [[fields]]
//! name = "user_name"
//! type = "string"
//! rules = "required;minLength=3"
//! rename = "user"
//!
//! [[fields]]
//! name = "address"
//! type = "inline"
//! record = "Address"
//!
//! [[fields.fields]]
//! name = "zip"
//! type = "string?"
//! rules = "numeric;length=5"
//! ```
//!
//! Type names are `string`, `int`, `uint` and `float`, each optionally
//! followed by `[]` for a list and then `?` for an optional value, plus
//! `inline` for a nested record and `any` for a value no rule applies to.

use crate::error::SchemaError;
use crate::types::{Classification, ValueCategory};
use serde::Deserialize;
use std::collections::HashSet;
use std::str::FromStr;

/// Declared type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A value with a fixed category
    Leaf(Classification),
    /// A nested record declared by the field's own `fields`
    Inline,
    /// Any JSON value; cannot carry rules
    Any,
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name {
            "inline" => return Ok(FieldType::Inline),
            "any" => return Ok(FieldType::Any),
            _ => {}
        }

        let (rest, optional) = match name.strip_suffix('?') {
            Some(rest) => (rest, true),
            None => (name, false),
        };
        let (base, list) = match rest.strip_suffix("[]") {
            Some(base) => (base, true),
            None => (rest, false),
        };

        let category = match (base, list) {
            ("string", false) => ValueCategory::String,
            ("int", false) => ValueCategory::Signed,
            ("uint", false) => ValueCategory::Unsigned,
            ("float", false) => ValueCategory::Float,
            ("string", true) => ValueCategory::StringList,
            ("int", true) => ValueCategory::SignedList,
            ("uint", true) => ValueCategory::UnsignedList,
            ("float", true) => ValueCategory::FloatList,
            _ => return Err(SchemaError::UnknownType(name.to_string())),
        };

        Ok(FieldType::Leaf(Classification { category, optional }))
    }
}

/// A record layout loaded from a schema file
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

/// One field of a record schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// Declared field name
    pub name: String,
    pub field_type: FieldType,
    /// Rule tag; empty when the field is not validated
    pub rules: String,
    /// Key the value is serialized under, if it differs from `name`
    pub rename: Option<String>,
    /// Layout of an inline field
    pub inline: Option<RecordSchema>,
}

impl FieldSchema {
    /// The document key this field is read from
    pub fn key(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    name: String,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    rules: String,
    #[serde(default)]
    rename: Option<String>,
    #[serde(default)]
    record: Option<String>,
    #[serde(default)]
    fields: Vec<RawField>,
}

impl RecordSchema {
    /// Parse a schema from a TOML string
    pub fn parse(s: &str) -> Result<Self, SchemaError> {
        let raw: RawRecord = toml::from_str(s)?;
        Self::build(raw.name, raw.fields)
    }

    fn build(name: String, raw_fields: Vec<RawField>) -> Result<Self, SchemaError> {
        if name.trim().is_empty() {
            return Err(SchemaError::Invalid("record name cannot be empty".to_string()));
        }

        let mut names = HashSet::new();
        let mut keys = HashSet::new();
        let mut fields = Vec::with_capacity(raw_fields.len());

        for raw in raw_fields {
            if !names.insert(raw.name.clone()) {
                return Err(SchemaError::Invalid(format!(
                    "duplicate field '{}' in record '{}'",
                    raw.name, name
                )));
            }

            let field_type: FieldType = raw.type_name.parse()?;
            let inline = match field_type {
                FieldType::Inline => {
                    let record_name = raw.record.unwrap_or_else(|| raw.name.clone());
                    Some(Self::build(record_name, raw.fields)?)
                }
                _ => {
                    if !raw.fields.is_empty() || raw.record.is_some() {
                        return Err(SchemaError::Invalid(format!(
                            "field '{}' in record '{}' is not inline but declares nested fields",
                            raw.name, name
                        )));
                    }
                    None
                }
            };

            let field = FieldSchema {
                name: raw.name,
                field_type,
                rules: raw.rules,
                rename: raw.rename,
                inline,
            };
            if field.field_type != FieldType::Inline && !keys.insert(field.key().to_string()) {
                return Err(SchemaError::Invalid(format!(
                    "duplicate key '{}' in record '{}'",
                    field.key(),
                    name
                )));
            }
            fields.push(field);
        }

        Ok(RecordSchema { name, fields })
    }
}
