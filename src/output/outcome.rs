#![forbid(unsafe_code)]

//! Per-record validation outcomes shared by the formatters

use crate::report::ValidationReport;

/// Result of validating one record from one input
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    /// Input the record was read from
    pub source: String,
    /// Position of the record within its input
    pub index: usize,
    /// Violations, or `None` for a valid record
    pub report: Option<ValidationReport>,
}

impl RecordOutcome {
    pub fn is_valid(&self) -> bool {
        self.report.is_none()
    }
}

/// Totals over a set of outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub records_checked: usize,
    pub records_invalid: usize,
    pub fields_invalid: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[RecordOutcome]) -> Self {
        let mut summary = Summary {
            records_checked: outcomes.len(),
            ..Summary::default()
        };
        for report in outcomes.iter().filter_map(|o| o.report.as_ref()) {
            summary.records_invalid += 1;
            summary.fields_invalid += report.len();
        }
        summary
    }

    pub fn passed(&self) -> bool {
        self.records_invalid == 0
    }
}
