//! Core error taxonomy.
//!
//! Three kinds, deliberately coarse: callers route on the kind, not the
//! message. None of these are retried internally; retrying a wrong-key
//! failure is never correct and retrying a format failure cannot succeed.

use thiserror::Error;

/// Result type for core encryption/decryption operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by the encryption and decryption engines.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Engine construction or block rotation could not complete. Fatal to
    /// the engine instance; the caller must not keep using it.
    #[error("crypto core initialization failed: {0}")]
    InitializationFailed(String),

    /// The message does not parse as a wire message: wrong field count or
    /// malformed base64. Indicates garbage input, not a key mismatch.
    #[error("invalid input format: {0}")]
    InvalidInputFormat(String),

    /// A cipher step itself failed. The cause distinguishes "wrong key"
    /// from structural failures.
    #[error("crypto core failed: {cause}")]
    CryptoCoreFailed { cause: CryptoCause },
}

/// Underlying cause of a [`CoreError::CryptoCoreFailed`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CryptoCause {
    #[error("bad padding after decryption (likely wrong key)")]
    BadPadding,

    #[error("sealed key part would not open (wrong key or tampered data)")]
    KeyUnwrap,

    #[error("invalid key")]
    InvalidKey,

    #[error("invalid algorithm parameter")]
    InvalidParameter,

    #[error("illegal cipher block size")]
    BlockSize,
}

impl CoreError {
    pub(crate) fn init(message: impl Into<String>) -> Self {
        CoreError::InitializationFailed(message.into())
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        CoreError::InvalidInputFormat(message.into())
    }

    pub(crate) fn crypto(cause: CryptoCause) -> Self {
        CoreError::CryptoCoreFailed { cause }
    }

    /// True when the failure is the signal a boundary layer should read as
    /// "decrypted with the wrong key" rather than corrupted input.
    pub fn is_wrong_key(&self) -> bool {
        matches!(
            self,
            CoreError::CryptoCoreFailed {
                cause: CryptoCause::BadPadding | CryptoCause::KeyUnwrap
            }
        )
    }
}
