//! Error types for the poultry record system
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for poultry record operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the poultry record system
#[derive(Error, Debug)]
pub enum Error {
    /// Any fault in the store layer
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Update or delete target does not exist
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Identifier is not well-formed
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Payload field could not be coerced to its declared type
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote call failed (transport error or non-success status)
    #[error("HTTP error: {0}")]
    Http(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    /// Create an invalid payload error
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
