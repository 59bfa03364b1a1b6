//! Error types for the lookup core

use thiserror::Error;

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the codec, signer and entry model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Odd-length or non-hexadecimal input
    #[error("Invalid hex encoding: {0}")]
    InvalidEncoding(String),

    /// Decoded key material has the wrong length
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Colour outside the fixed enumeration
    #[error("Invalid colour: {0}")]
    InvalidColour(String),

    /// Signature did not verify, or was malformed
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Transport encoding error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<hex::FromHexError> for CoreError {
    fn from(err: hex::FromHexError) -> Self {
        CoreError::InvalidEncoding(err.to_string())
    }
}

impl From<ed25519_dalek::SignatureError> for CoreError {
    fn from(err: ed25519_dalek::SignatureError) -> Self {
        CoreError::InvalidSignature(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}
