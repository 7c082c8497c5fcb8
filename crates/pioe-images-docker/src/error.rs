//! Docker-specific error types

use thiserror::Error;

/// Docker-specific error type
#[derive(Error, Debug)]
pub enum DockerError {
    /// The docker binary could not be spawned
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The invocation ran but exited with a non-zero status
    #[error("`{command}` exited with status {code}")]
    NonZeroExit { command: String, code: i32 },

    /// An image tag or container name failed validation
    #[error("Invalid docker object name: {name}")]
    InvalidName { name: String },
}

/// Result type alias for Docker operations
pub type Result<T> = std::result::Result<T, DockerError>;
