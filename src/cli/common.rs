//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading settings and
//! resolving output options from flags and settings.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::config::{SETTINGS_FILE, Settings};
use crate::error::SettingsError;
use std::path::Path;
use tracing::debug;

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INVALID: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Load fieldcheck settings
///
/// An explicit path must exist. Without one, `fieldcheck.toml` in the working
/// directory is used if present and defaults otherwise.
///
/// # Errors
///
/// Returns `SettingsError::Io` if an explicit settings file cannot be read.
/// Returns `SettingsError::Parse` if the settings file is invalid.
pub(crate) fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading settings");
            Settings::load(path)
        }
        None => Settings::load_or_default(SETTINGS_FILE),
    }
}

/// Flag value if given, settings value otherwise
pub(crate) fn resolve_format(flag: Option<OutputFormat>, settings: &Settings) -> OutputFormat {
    flag.unwrap_or_else(|| settings.output.format.into())
}

/// Flag value if given, settings value otherwise
pub(crate) fn resolve_color(flag: Option<ColorChoice>, settings: &Settings) -> ColorChoice {
    flag.unwrap_or_else(|| settings.output.color.into())
}
