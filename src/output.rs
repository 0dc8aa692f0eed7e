//! Output formatters (human and JSONL)

pub mod catalog;
pub mod human;
pub mod jsonl;
pub mod outcome;

pub use catalog::{CatalogHumanFormatter, CatalogJsonlFormatter, RuleEntry, catalog};
pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;
pub use outcome::{RecordOutcome, Summary};
