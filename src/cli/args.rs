//! CLI argument parsing using clap

use crate::config::{ColorOption, OutputFormat as SettingsFormat};
use crate::types::NamingConvention;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for fieldcheck commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

impl From<SettingsFormat> for OutputFormat {
    fn from(format: SettingsFormat) -> Self {
        match format {
            SettingsFormat::Human => OutputFormat::Human,
            SettingsFormat::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<ColorOption> for ColorChoice {
    fn from(color: ColorOption) -> Self {
        match color {
            ColorOption::Auto => ColorChoice::Auto,
            ColorOption::Always => ColorChoice::Always,
            ColorOption::Never => ColorChoice::Never,
        }
    }
}

impl From<ColorChoice> for termcolor::ColorChoice {
    fn from(color: ColorChoice) -> Self {
        match color {
            ColorChoice::Auto => termcolor::ColorChoice::Auto,
            ColorChoice::Always => termcolor::ColorChoice::Always,
            ColorChoice::Never => termcolor::ColorChoice::Never,
        }
    }
}

/// Field naming convention as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamingChoice {
    /// Declared field names as-is
    Verbatim,
    /// lowerCamel names
    #[value(name = "lowerCamel", alias = "lower-camel")]
    LowerCamel,
    /// Serialized names where declared
    Serialized,
}

impl From<NamingChoice> for NamingConvention {
    fn from(naming: NamingChoice) -> Self {
        match naming {
            NamingChoice::Verbatim => NamingConvention::Verbatim,
            NamingChoice::LowerCamel => NamingConvention::LowerCamel,
            NamingChoice::Serialized => NamingConvention::Serialized,
        }
    }
}

/// fieldcheck CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "fieldcheck")]
#[command(about = "Validate records against per-field rule tags")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (defaults to the settings file, then auto)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available fieldcheck subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate JSON records against a record schema
    Check {
        /// Record schema file (TOML)
        #[arg(short, long)]
        schema: PathBuf,

        /// JSON documents to validate
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format (defaults to the settings file, then human)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Naming convention for reported field names
        #[arg(long)]
        naming: Option<NamingChoice>,

        /// Settings file (defaults to fieldcheck.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List all rule keywords
    Rules {
        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,
    },
}
