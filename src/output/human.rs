#![forbid(unsafe_code)]

//! Human-readable output formatter
//!
//! Prints each invalid record's rendered report under a header naming its
//! input and position, followed by a one-line status. Headers and the status
//! line are colored when the writer supports it.

use crate::output::outcome::{RecordOutcome, Summary};
use std::io;
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable formatter for validation outcomes
pub struct HumanFormatter;

impl HumanFormatter {
    /// Creates a new HumanFormatter
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Writes every invalid record's report and the final status
    pub fn write(&self, out: &mut dyn WriteColor, outcomes: &[RecordOutcome]) -> io::Result<()> {
        for outcome in outcomes {
            let Some(report) = &outcome.report else {
                continue;
            };

            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "{} [record {}]", outcome.source, outcome.index)?;
            out.reset()?;
            writeln!(out, ": {} invalid field(s)", report.len())?;

            for line in report.render().lines() {
                if line.is_empty() {
                    writeln!(out)?;
                } else {
                    writeln!(out, "  {}", line)?;
                }
            }
            writeln!(out)?;
        }

        self.write_status(out, &Summary::from_outcomes(outcomes))
    }

    fn write_status(&self, out: &mut dyn WriteColor, summary: &Summary) -> io::Result<()> {
        if summary.passed() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(out, "Check PASSED")?;
            out.reset()?;
            writeln!(out, ": {} record(s) valid", summary.records_checked)
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "Check FAILED")?;
            out.reset()?;
            writeln!(
                out,
                ": {} of {} record(s) invalid, {} field(s) with violations",
                summary.records_invalid, summary.records_checked, summary.fields_invalid
            )
        }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}
