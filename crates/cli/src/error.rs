//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// A command-line override produced an invalid configuration
    #[error("Invalid override: {message}")]
    InvalidOverride { message: String },

    /// The render loop task panicked or was aborted
    #[error("Render loop task failed: {message}")]
    LoopTask { message: String },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn invalid_override(message: impl Into<String>) -> Self {
        Self::InvalidOverride {
            message: message.into(),
        }
    }

    pub fn loop_task(message: impl Into<String>) -> Self {
        Self::LoopTask {
            message: message.into(),
        }
    }
}
