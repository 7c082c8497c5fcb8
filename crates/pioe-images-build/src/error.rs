//! Error types for the build orchestration module

use thiserror::Error;

/// Build-specific error types
#[derive(Error, Debug)]
pub enum BuildError {
    /// Template loading or rendering failed
    #[error("Template error: {message}")]
    Template { message: String },

    /// Core library error
    #[error(transparent)]
    Core(#[from] pioe_images_core::Error),

    /// Docker invocation error
    #[error(transparent)]
    Docker(#[from] pioe_images_docker::DockerError),
}

/// Result type alias for build operations
pub type Result<T> = std::result::Result<T, BuildError>;

impl BuildError {
    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template { message: message.into() }
    }
}
