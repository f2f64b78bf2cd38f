use thiserror::Error;

use crate::{ClockError, config_store::ConfigError};

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// Arguments were parsed but make no sense together.
    ///
    /// Unknown themes and malformed `--time` values end up here.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The settings store rejected a key or value.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The clock itself failed.
    #[error("Clock error: {0}")]
    Clock(#[from] ClockError),
}

/// Type alias for command execution results.
///
/// Commands return the text to print on success.
pub type CommandResult = Result<String, CliError>;
