//! Error types for noteweave.

use thiserror::Error;

use crate::models::BlockId;

/// Result type alias using noteweave's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for noteweave operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Block not found in the cache or via the backend
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    /// No applicable template resolved for the target block
    #[error("No AI template found")]
    NoTemplate,

    /// More than one candidate template annotation on one block
    #[error("Too many AI template found")]
    AmbiguousTemplate,

    /// A property exists but its shape does not match the schema
    #[error("Malformed property: {0}")]
    MalformedProperty(String),

    /// Remote generation failed (transport, non-2xx, or malformed envelope)
    #[error("AI generation failed: {0}")]
    Generation(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transactional graph edit failed
    #[error("Edit error: {0}")]
    Edit(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
