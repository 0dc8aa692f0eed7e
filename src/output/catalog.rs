#![forbid(unsafe_code)]

//! Rule catalogue formatters
//!
//! Used by `fieldcheck rules` to list every rule keyword with its parameter
//! shape and the field categories it applies to.

use crate::rules::ConstraintKind;
use crate::types::ValueCategory;
use serde::Serialize;

/// Catalogue information for a single rule keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleEntry {
    pub keyword: &'static str,
    pub parameter: &'static str,
    pub categories: Vec<&'static str>,
    pub description: &'static str,
}

impl RuleEntry {
    pub fn from_kind(kind: ConstraintKind) -> Self {
        RuleEntry {
            keyword: kind.keyword(),
            parameter: kind.param_kind().as_str(),
            categories: ValueCategory::ALL
                .into_iter()
                .filter(|category| kind.applies_to(*category))
                .map(ValueCategory::as_str)
                .collect(),
            description: kind.description(),
        }
    }
}

/// Every rule keyword, in catalogue order
pub fn catalog() -> Vec<RuleEntry> {
    ConstraintKind::ALL.into_iter().map(RuleEntry::from_kind).collect()
}

/// Human-readable formatter for the rule catalogue
pub struct CatalogHumanFormatter;

impl CatalogHumanFormatter {
    pub fn new() -> Self {
        CatalogHumanFormatter
    }

    pub fn format(&self, entries: &[RuleEntry]) -> String {
        let mut output = String::new();

        output.push_str(&format!("Rules ({} keywords):\n", entries.len()));
        output.push('\n');

        for entry in entries {
            output.push_str(&format!("{}\n", entry.keyword));
            output.push_str(&format!("  Description: {}\n", entry.description));
            output.push_str(&format!("  Parameter: {}\n", entry.parameter));
            output.push_str(&format!("  Applies to: {}\n", entry.categories.join(", ")));
            output.push('\n');
        }

        output
    }

    /// Write the formatted output to stdout
    pub fn write_to_stdout(&self, entries: &[RuleEntry]) {
        print!("{}", self.format(entries));
    }
}

impl Default for CatalogHumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// JSONL formatter for the rule catalogue
pub struct CatalogJsonlFormatter;

impl CatalogJsonlFormatter {
    pub fn new() -> Self {
        CatalogJsonlFormatter
    }

    /// Format the catalogue as JSONL, one rule per line
    pub fn format(&self, entries: &[RuleEntry]) -> String {
        let mut output = String::new();

        for entry in entries {
            if let Ok(json) = serde_json::to_string(entry) {
                output.push_str(&json);
                output.push('\n');
            }
        }

        output
    }

    /// Write the formatted output to stdout
    pub fn write_to_stdout(&self, entries: &[RuleEntry]) {
        print!("{}", self.format(entries));
    }
}

impl Default for CatalogJsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Format;

    #[test]
    fn test_catalog_covers_every_keyword() {
        let entries = catalog();
        assert_eq!(entries.len(), ConstraintKind::ALL.len());
        assert_eq!(entries[0].keyword, "required");
        assert_eq!(entries.last().unwrap().keyword, "mustContainNone");
    }

    #[test]
    fn test_entry_categories() {
        let required = RuleEntry::from_kind(ConstraintKind::Required);
        assert_eq!(required.categories.len(), ValueCategory::ALL.len());
        assert_eq!(required.parameter, "none");

        let min = RuleEntry::from_kind(ConstraintKind::Min);
        assert_eq!(min.parameter, "number");
        assert!(min.categories.iter().all(|c| !c.ends_with("list")));

        let email = RuleEntry::from_kind(ConstraintKind::Format(Format::Email));
        assert_eq!(email.categories, vec![ValueCategory::String.as_str()]);
    }

    #[test]
    fn test_human_format() {
        let entries = vec![RuleEntry::from_kind(ConstraintKind::MinLength)];
        let output = CatalogHumanFormatter::new().format(&entries);
        assert!(output.starts_with("Rules (1 keywords):\n\nminLength\n"));
        assert!(output.contains("  Parameter: count\n"));
        assert!(output.contains("  Applies to: string\n"));
    }

    #[test]
    fn test_jsonl_format() {
        let output = CatalogJsonlFormatter::default().format(&catalog());
        assert_eq!(output.lines().count(), ConstraintKind::ALL.len());
        let first: serde_json::Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
        assert_eq!(first["keyword"], "required");
        assert!(first["categories"].is_array());
    }
}
