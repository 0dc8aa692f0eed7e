//! Parsing and validation for fieldcheck.toml settings files

use crate::error::SettingsError;
use crate::types::NamingConvention;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default settings file name, looked up in the working directory
pub const SETTINGS_FILE: &str = "fieldcheck.toml";

/// Main settings struct for fieldcheck.toml
///
/// Every section is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Validator settings
    #[serde(default)]
    pub validator: ValidatorSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load settings from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse settings from a TOML string
    pub fn parse(s: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    fn validate(&self) -> Result<(), SettingsError> {
        // JSONL records are machine-read; escape codes would corrupt them
        if self.output.format == OutputFormat::Jsonl && self.output.color == ColorOption::Always {
            return Err(SettingsError::InvalidValue {
                field: "output.color".to_string(),
                message: "color cannot be forced for jsonl output".to_string(),
            });
        }

        Ok(())
    }
}

/// Validator section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorSettings {
    /// Naming convention for reported field names
    #[serde(default)]
    pub naming: NamingConvention,
}

/// Output section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_SETTINGS: &str = r#"
[validator]
naming = "serialized"

[output]
format = "jsonl"
color = "never"
"#;

    #[test]
    fn test_parse_full_settings() {
        let settings = Settings::parse(FULL_SETTINGS).unwrap();
        assert_eq!(settings.validator.naming, NamingConvention::Serialized);
        assert_eq!(settings.output.format, OutputFormat::Jsonl);
        assert_eq!(settings.output.color, ColorOption::Never);
    }

    #[test]
    fn test_parse_empty_settings() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.validator.naming, NamingConvention::LowerCamel);
        assert_eq!(settings.output.format, OutputFormat::Human);
        assert_eq!(settings.output.color, ColorOption::Auto);
    }

    #[test]
    fn test_parse_partial_section() {
        let settings = Settings::parse("[validator]\nnaming = \"verbatim\"\n").unwrap();
        assert_eq!(settings.validator.naming, NamingConvention::Verbatim);
        assert_eq!(settings.output, OutputSettings::default());
    }

    #[test]
    fn test_parse_unknown_naming() {
        let result = Settings::parse("[validator]\nnaming = \"kebab\"\n");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_parse_unknown_key() {
        let result = Settings::parse("[output]\nstyle = \"fancy\"\n");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_forced_color_with_jsonl_rejected() {
        let result = Settings::parse("[output]\nformat = \"jsonl\"\ncolor = \"always\"\n");
        assert!(matches!(
            result,
            Err(SettingsError::InvalidValue { field, .. }) if field == "output.color"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Settings::load("/nonexistent/fieldcheck.toml");
        assert!(matches!(result, Err(SettingsError::Io(_))));
        let settings = Settings::load_or_default("/nonexistent/fieldcheck.toml").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
