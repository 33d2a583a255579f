//! Common error types for DocVault.

use thiserror::Error;

/// Top-level error type for DocVault operations.
///
/// Callers match on the variant to decide how to react; the message is for
/// humans only.
#[derive(Debug, Error)]
pub enum Error {
    /// Authenticated decryption or key handling failed.
    #[error("Cryptographic error: {0}")]
    Crypto(String),

    /// The supplied password does not unlock the document.
    #[error("Access denied: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence failed or durable state is malformed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether this error comes from the persistence layer.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Io(_))
    }
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
