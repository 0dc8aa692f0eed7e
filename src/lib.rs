#![forbid(unsafe_code)]

//! fieldcheck: declarative per-field validation for structured records
//!
//! Records describe their fields through the [`Validate`] trait, usually via
//! the [`validate_record!`] macro. Each field may carry a rule tag such as
//! `required;minLength=3;alpha`. Validation evaluates every rule and returns
//! a [`ValidationReport`] listing each failing field, or `None` when the
//! record is valid. Broken rule tags are reported as [`ConfigError`] and
//! abort the call.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod record;
pub mod report;
pub mod rules;
pub mod schema;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, FieldcheckError, RuleError, ValidationError};

// Re-export the validation entry points and record description API
pub use engine::{Validator, validate};
pub use record::{Classify, Extract, Field, FieldValue, Validate};
pub use report::{FieldReport, ValidationReport, Violation};

// Re-export core domain types for convenient access
pub use types::{Classification, NamingConvention, ValueCategory};
