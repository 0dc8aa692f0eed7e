//! CLI argument parsing and command dispatch

pub mod args;
pub mod check;
pub mod common;
pub mod rules;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, NamingChoice, OutputFormat};
pub use check::CheckOptions;
