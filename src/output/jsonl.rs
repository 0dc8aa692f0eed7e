#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. One report record per invalid record, in input order
//! 2. One status record

use crate::output::outcome::{RecordOutcome, Summary};
use crate::report::ValidationReport;
use serde::Serialize;

/// JSONL output formatter
///
/// Formats validation outcomes as JSON Lines (one JSON object per line).
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format the outcomes as JSONL
    pub fn format(&self, outcomes: &[RecordOutcome]) -> String {
        let mut output = String::new();

        for outcome in outcomes {
            let Some(report) = &outcome.report else {
                continue;
            };
            let record = ReportRecord {
                record_type: "report",
                source: &outcome.source,
                index: outcome.index,
                report,
            };
            if let Ok(json) = serde_json::to_string(&record) {
                output.push_str(&json);
                output.push('\n');
            }
        }

        let summary = Summary::from_outcomes(outcomes);
        let status = StatusRecord {
            record_type: "status",
            passed: summary.passed(),
            records_checked: summary.records_checked as u64,
            records_invalid: summary.records_invalid as u64,
            fields_invalid: summary.fields_invalid as u64,
        };

        if let Ok(json) = serde_json::to_string(&status) {
            output.push_str(&json);
            output.push('\n');
        }

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Report record for JSONL output
#[derive(Debug, Serialize)]
struct ReportRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    source: &'a str,
    index: usize,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    records_checked: u64,
    records_invalid: u64,
    fields_invalid: u64,
}
