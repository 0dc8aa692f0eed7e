//! Check command implementation
//!
//! This module implements the `fieldcheck check` command, which:
//! - Loads settings from fieldcheck.toml or `--config`
//! - Loads the record schema
//! - Reads and binds every input document
//! - Validates all records in parallel
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::args::{ColorChoice, NamingChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_INVALID, EXIT_PARSE_ERROR, EXIT_SUCCESS, load_settings, resolve_color,
    resolve_format,
};
use crate::engine::Validator;
use crate::error::{FieldcheckError, SchemaError, SettingsError};
use crate::output::{HumanFormatter, JsonlFormatter, RecordOutcome, Summary};
use crate::schema::{DynamicRecord, RecordSchema, parse_documents};
use crate::types::NamingConvention;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use termcolor::StandardStream;
use tracing::{debug, info};

/// Options for one `check` invocation
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub schema: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub format: Option<OutputFormat>,
    pub naming: Option<NamingChoice>,
    pub config: Option<PathBuf>,
    pub color: Option<ColorChoice>,
}

/// Run the check command
///
/// This is the main entry point for the check command. It coordinates
/// all the components and returns an appropriate exit code.
///
/// # Returns
///
/// Exit code:
/// - 0: Success (all records valid)
/// - 1: Invalid (one or more records have violations)
/// - 2: Error (configuration/I/O error)
/// - 3: Parse error (invalid TOML or JSON input)
pub fn run_check(options: &CheckOptions) -> i32 {
    match run_check_inner(options) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_INVALID,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &FieldcheckError) -> i32 {
    match error {
        FieldcheckError::Settings(SettingsError::Parse(_)) => EXIT_PARSE_ERROR,
        FieldcheckError::Schema { source, .. } => match source {
            SchemaError::Parse(_)
            | SchemaError::Json(_)
            | SchemaError::NotAnObject { .. }
            | SchemaError::MissingValue { .. }
            | SchemaError::TypeMismatch { .. } => EXIT_PARSE_ERROR,
            SchemaError::UnknownType(_) | SchemaError::Invalid(_) => EXIT_ERROR,
        },
        _ => EXIT_ERROR,
    }
}

/// Internal implementation of check command
fn run_check_inner(options: &CheckOptions) -> Result<bool, FieldcheckError> {
    // 1. Settings, with flags taking precedence
    let settings = load_settings(options.config.as_deref())?;
    let format = resolve_format(options.format, &settings);
    let color = resolve_color(options.color, &settings);
    let naming = options
        .naming
        .map(NamingConvention::from)
        .unwrap_or(settings.validator.naming);

    // 2. Record schema
    let schema_text = read_file(&options.schema)?;
    let schema = RecordSchema::parse(&schema_text).map_err(|source| FieldcheckError::Schema {
        file: options.schema.clone(),
        source,
    })?;
    debug!(record = %schema.name, fields = schema.fields.len(), "loaded schema");

    // 3. Bind every document of every input
    let mut sources = Vec::new();
    let mut records = Vec::new();
    for input in &options.inputs {
        let text = read_file(input)?;
        let documents = parse_documents(&text).map_err(|source| FieldcheckError::Schema {
            file: input.clone(),
            source,
        })?;

        for (index, document) in documents.iter().enumerate() {
            let record = DynamicRecord::bind(&schema, document).map_err(|source| {
                FieldcheckError::Schema {
                    file: input.clone(),
                    source,
                }
            })?;
            sources.push((input.display().to_string(), index));
            records.push(record);
        }
    }

    info!(
        records = records.len(),
        inputs = options.inputs.len(),
        naming = %naming,
        "validating records"
    );

    // 4. Validate in parallel; the first configuration error aborts
    let validator = Validator::new(naming);
    let mut outcomes = Vec::with_capacity(records.len());
    for ((source, index), result) in sources.into_iter().zip(validator.validate_all(&records)) {
        outcomes.push(RecordOutcome {
            source,
            index,
            report: result?,
        });
    }

    // 5. Format and print output
    match format {
        OutputFormat::Human => {
            let mut stdout = StandardStream::stdout(color.into());
            HumanFormatter::new().write(&mut stdout, &outcomes)?;
        }
        OutputFormat::Jsonl => print!("{}", JsonlFormatter::new().format(&outcomes)),
    }

    Ok(Summary::from_outcomes(&outcomes).passed())
}

fn read_file(path: &Path) -> Result<String, FieldcheckError> {
    fs::read_to_string(path).map_err(|e| {
        FieldcheckError::Io(io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}
