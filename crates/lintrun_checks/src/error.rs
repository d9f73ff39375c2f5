//! Error types for check-run reporting.

use thiserror::Error;

/// Error type for check-run API operations.
#[derive(Debug, Error)]
pub enum ChecksError {
    /// Network request failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The repository context is missing or malformed.
    #[error("Invalid GitHub context: {0}")]
    Context(String),

    /// Failed to build HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl ChecksError {
    pub fn context(message: impl Into<String>) -> Self {
        Self::Context(message.into())
    }
}
