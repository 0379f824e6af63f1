//! Result and error types for Cubrir.

use thiserror::Error;

/// Result type for Cubrir operations
pub type CubrirResult<T> = Result<T, CubrirError>;

/// Errors that can occur in Cubrir
#[derive(Debug, Error)]
pub enum CubrirError {
    /// Report filter pattern did not compile
    #[error("Invalid report filter: {message}")]
    InvalidFilter {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CubrirError {
    /// Create an invalid filter error
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }
}
