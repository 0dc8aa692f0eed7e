#![forbid(unsafe_code)]

//! Record traversal and report aggregation
//!
//! The validator walks a record's fields depth-first in declaration order.
//! Inline sub-records are validated in place and their field reports are
//! spliced into the parent's report unchanged. Every other field has its tag
//! looked up in the rule cache, then is extracted and evaluated. It is kept
//! in the report only if it has at least one violation.

use crate::engine::evaluator::evaluate;
use crate::error::{ConfigError, RuleError, ValidationError};
use crate::record::{Extract, Field, Slot, Validate};
use crate::report::{FieldReport, ValidationReport, Violation};
use crate::rules::{Constraint, ConstraintKind, cached_rules};
use crate::types::{Classification, NamingConvention};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Validates records against their field rules
///
/// A validator holds no per-call state and can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    naming: NamingConvention,
}

impl Validator {
    pub fn new(naming: NamingConvention) -> Self {
        Validator { naming }
    }

    /// The convention used to name fields in reports
    pub fn naming(&self) -> NamingConvention {
        self.naming
    }

    /// Validates one record
    ///
    /// Returns `Ok(None)` when every rule holds, including when the record
    /// declares no rules at all.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a broken rule tag or a tagged field that
    /// cannot be validated. No partial report is produced in that case.
    pub fn validate<R: Validate + ?Sized>(
        &self,
        record: &R,
    ) -> Result<Option<ValidationReport>, ConfigError> {
        let mut reports = Vec::new();
        self.walk(&record, &mut reports)?;
        Ok(ValidationReport::from_fields(reports))
    }

    /// Validates a record that may be missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRecord` for `None`, otherwise behaves as
    /// [`Validator::validate`].
    pub fn validate_optional<R: Validate + ?Sized>(
        &self,
        record: Option<&R>,
    ) -> Result<Option<ValidationReport>, ConfigError> {
        match record {
            Some(record) => self.validate(record),
            None => Err(ConfigError::MissingRecord),
        }
    }

    /// Validates a record, folding violations into the error channel
    pub fn check<R: Validate + ?Sized>(&self, record: &R) -> Result<(), ValidationError> {
        match self.validate(record)? {
            Some(report) => Err(ValidationError::Invalid(report)),
            None => Ok(()),
        }
    }

    /// Validates independent records in parallel, keeping input order
    pub fn validate_all<R: Validate + Sync>(
        &self,
        records: &[R],
    ) -> Vec<Result<Option<ValidationReport>, ConfigError>> {
        records
            .par_iter()
            .map(|record| self.validate(record))
            .collect()
    }

    fn walk(&self, record: &dyn Validate, reports: &mut Vec<FieldReport>) -> Result<(), ConfigError> {
        let record_name = record.record_name();

        for field in record.fields() {
            match field.slot() {
                Slot::Inline(inner) => {
                    if !field.rules().trim().is_empty() {
                        debug!(
                            record = record_name,
                            field = field.name(),
                            "ignoring rules on inline field"
                        );
                    }
                    debug!(
                        record = record_name,
                        field = field.name(),
                        inner = inner.record_name(),
                        "validating inline record"
                    );
                    self.walk(*inner, reports)?;
                }
                Slot::Opaque { type_name } => {
                    if field.rules().trim().is_empty() {
                        trace!(record = record_name, field = field.name(), "skipping opaque field");
                        continue;
                    }
                    return Err(ConfigError::UnsupportedType {
                        record: record_name.to_string(),
                        field: field.name().to_string(),
                        type_name: *type_name,
                    });
                }
                Slot::Leaf {
                    classification,
                    value,
                } => {
                    if let Some(report) =
                        self.check_field(record_name, &field, *classification, *value)?
                    {
                        reports.push(report);
                    }
                }
            }
        }

        Ok(())
    }

    fn check_field(
        &self,
        record_name: &str,
        field: &Field<'_>,
        classification: Classification,
        value: &dyn Extract,
    ) -> Result<Option<FieldReport>, ConfigError> {
        let constraints = cached_rules(field.rules())
            .map_err(|e| ConfigError::rule(record_name, field.name(), e))?;
        if constraints.is_empty() {
            trace!(record = record_name, field = field.name(), "no rules");
            return Ok(None);
        }

        debug!(
            record = record_name,
            field = field.name(),
            classification = %classification,
            rules = constraints.len(),
            "validating field"
        );

        let (extracted, violations) = match value.extract() {
            Some(extracted) => {
                let violations = evaluate(&constraints, &extracted)
                    .map_err(|e| ConfigError::rule(record_name, field.name(), e))?;
                (Some(extracted.to_field_value()), violations)
            }
            None => {
                let violations = absent_violations(&constraints, classification)
                    .map_err(|e| ConfigError::rule(record_name, field.name(), e))?;
                (None, violations)
            }
        };

        if violations.is_empty() {
            return Ok(None);
        }

        Ok(Some(FieldReport {
            field: self.naming.resolve(field.name(), field.serialized_name()),
            value: extracted,
            record: record_name.to_string(),
            violations,
        }))
    }
}

/// Violations for an absent value: a single `required`, or nothing
fn absent_violations(
    constraints: &[Constraint],
    classification: Classification,
) -> Result<Vec<Violation>, RuleError> {
    match constraints
        .iter()
        .find(|c| c.kind == ConstraintKind::Required)
    {
        Some(required) => {
            required.resolve(classification.category)?;
            Ok(vec![Violation::new(ConstraintKind::Required, None)])
        }
        None => Ok(Vec::new()),
    }
}

/// Validates `record` with the default lowerCamel naming convention
///
/// # Errors
///
/// See [`Validator::validate`].
pub fn validate<R: Validate + ?Sized>(record: &R) -> Result<Option<ValidationReport>, ConfigError> {
    Validator::default().validate(record)
}
