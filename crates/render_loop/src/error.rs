//! Render loop error types
//!
//! Only raised while building the loop; a running loop has no error paths.

use thiserror::Error;

/// Render-loop-specific errors
#[derive(Debug, Error)]
pub enum RenderLoopError {
    /// Sink creation error
    #[error("failed to create sink '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// Loop configuration error
    #[error("invalid render loop configuration: {0}")]
    InvalidConfig(String),
}

impl RenderLoopError {
    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
