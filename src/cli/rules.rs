//! Rules command implementation
//!
//! Lists every rule keyword with its parameter shape and the field
//! categories it applies to.

use crate::cli::args::OutputFormat;
use crate::cli::common::EXIT_SUCCESS;
use crate::output::{CatalogHumanFormatter, CatalogJsonlFormatter, catalog};

/// Run the rules command
///
/// The catalogue is static, so this always succeeds.
pub fn run_rules(format: OutputFormat) -> i32 {
    let entries = catalog();

    match format {
        OutputFormat::Human => CatalogHumanFormatter::new().write_to_stdout(&entries),
        OutputFormat::Jsonl => CatalogJsonlFormatter::new().write_to_stdout(&entries),
    }

    EXIT_SUCCESS
}
