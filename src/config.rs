//! Settings file parsing and validation

pub mod settings;

pub use settings::{
    ColorOption, OutputFormat, OutputSettings, SETTINGS_FILE, Settings, ValidatorSettings,
};
