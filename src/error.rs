//! Error types for fieldcheck
//!
//! Validation produces two distinct kinds of failure. Violations are expected
//! outcomes and are collected into a [`ValidationReport`]. Configuration errors
//! are author mistakes in rule tags or record descriptions; they abort the
//! whole validation call and are modeled by the types in this module.

use crate::report::ValidationReport;
use crate::types::ValueCategory;
use std::path::PathBuf;

/// A problem with a single rule tag, independent of where it was declared
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Keyword outside the closed rule vocabulary
    #[error("Unknown rule keyword '{0}'")]
    UnknownKeyword(String),

    /// A parameterized keyword was written without `=`
    #[error("Rule '{keyword}' requires a parameter")]
    MissingParameter { keyword: String },

    /// A bare keyword was written with `=`
    #[error("Rule '{keyword}' does not take a parameter (got '{value}')")]
    UnexpectedParameter { keyword: String, value: String },

    /// The parameter cannot be coerced to the type the rule needs
    #[error("Invalid parameter '{value}' for rule '{keyword}': expected {expected}")]
    InvalidParameter {
        keyword: String,
        value: String,
        expected: &'static str,
    },

    /// The `matchPattern` parameter is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The rule has no meaning for the field's category
    #[error("Rule '{keyword}' does not apply to {category} fields")]
    Inapplicable {
        keyword: String,
        category: ValueCategory,
    },
}

/// Fatal configuration error raised while validating a record
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A rule on a field could not be parsed or coerced
    #[error("Invalid rule on {record}.{field}: {source}")]
    InvalidRule {
        record: String,
        field: String,
        #[source]
        source: RuleError,
    },

    /// A tagged field has a type no rule can be evaluated against
    #[error("Field {record}.{field} of type {type_name} carries rules but cannot be validated")]
    UnsupportedType {
        record: String,
        field: String,
        type_name: &'static str,
    },

    /// The top-level record was absent
    #[error("Cannot validate a missing record")]
    MissingRecord,
}

impl ConfigError {
    pub(crate) fn rule(record: &str, field: &str, source: RuleError) -> Self {
        ConfigError::InvalidRule {
            record: record.to_string(),
            field: field.to_string(),
            source,
        }
    }
}

/// Either channel of a failed validation, folded into one error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The record was checked and has violations
    #[error("{0}")]
    Invalid(ValidationReport),

    /// The record description or its rules are broken
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ValidationError {
    /// Returns the report if this is a violation failure
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ValidationError::Invalid(report) => Some(report),
            ValidationError::Config(_) => None,
        }
    }
}

/// Settings file errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML for the settings layout
    #[error("Invalid settings syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings are well-formed but semantically wrong
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Record schema and document binding errors
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Schema file is not valid TOML for the schema layout
    #[error("Invalid schema syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Unknown field type name in a schema
    #[error("Unknown field type '{0}'")]
    UnknownType(String),

    /// Schema is well-formed but inconsistent
    #[error("Invalid schema: {0}")]
    Invalid(String),

    /// Input document is not valid JSON
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// A document is not a JSON object
    #[error("Record {index} is not a JSON object")]
    NotAnObject { index: usize },

    /// A non-optional field is missing or null in a document
    #[error("Missing value for required field '{field}' in record '{record}'")]
    MissingValue { record: String, field: String },

    /// A document value does not match the declared field type
    #[error("Field '{field}' in record '{record}' expected {expected}, found {found}")]
    TypeMismatch {
        record: String,
        field: String,
        expected: String,
        found: String,
    },
}

/// Top-level error type for fieldcheck
#[derive(Debug, thiserror::Error)]
pub enum FieldcheckError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Settings error
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Schema error in a specific file
    #[error("Schema error in {file}: {source}")]
    Schema {
        file: PathBuf,
        #[source]
        source: SchemaError,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
