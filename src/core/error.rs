//! Error types for hashchain-lab.

use thiserror::Error;

/// Result type alias for chain operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in chain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Chain errors
    #[error("Block index {index} out of range for chain of length {len}")]
    OutOfRange { index: usize, len: usize },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Logging errors
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
