//! Error types for the core library

use thiserror::Error;

/// Core error type for pioe-images operations
///
/// A configuration failure is the only error that aborts a whole run
/// before any build starts; per-variant failures travel inside
/// `BuildResult` instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for pioe-images operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}
