//! Key management error types.

use thiserror::Error;

/// Result type for key management operations.
pub type KeyResult<T> = Result<T, KeyError>;

/// Errors that can occur while generating, loading or (un)sealing keys.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid key encoding: {0}")]
    InvalidEncoding(String),

    #[error("sealed data would not open (wrong key or tampered data)")]
    Unseal,

    #[error("passphrase protection failed: {0}")]
    Protect(String),

    #[error("key I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
