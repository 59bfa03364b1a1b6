//! Error types for the lookup console

use lookup_core::CoreError;
use thiserror::Error;

/// Result type for console operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by console operations
///
/// `LookupEmpty` and `DuplicateKey` are ordinary business outcomes rather
/// than faults; they share the error channel so handlers can treat every
/// negative result uniformly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Malformed hex in a key
    #[error("Invalid hex encoding: {0}")]
    InvalidEncoding(String),

    /// Decoded key is not 32 bytes
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// No key was supplied or entered
    #[error("Secret key is required")]
    MissingKey,

    /// Colour outside the fixed enumeration
    #[error("Invalid colour: {0}")]
    InvalidColour(String),

    /// Privileged action without a live key, or the ledger refused the key
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The ledger already holds an entry for this barcode
    #[error("Entry already exists for barcode '{0}'")]
    DuplicateKey(String),

    /// No entry for this barcode
    #[error("No entry found for barcode '{0}'")]
    LookupEmpty(String),

    /// The ledger call did not complete normally
    #[error("Ledger call failed: {0}")]
    TransportFailure(String),

    /// A form field could not be coerced to its type
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The credential could not be persisted
    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Whether the error came from local key handling, before any ledger call
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidEncoding(_) | ClientError::InvalidKeyLength { .. }
        )
    }
}

/// Errors at the ledger collaborator boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The call did not reach the ledger or did not return
    #[error("Transport error: {0}")]
    Transport(String),

    /// The ledger answered with something that could not be decoded
    #[error("Malformed reply: {0}")]
    Malformed(String),
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidEncoding(msg) => ClientError::InvalidEncoding(msg),
            CoreError::InvalidKeyLength { expected, actual } => {
                ClientError::InvalidKeyLength { expected, actual }
            }
            CoreError::InvalidColour(colour) => ClientError::InvalidColour(colour),
            CoreError::InvalidSignature(msg) => ClientError::Unauthorized(msg),
            CoreError::Serialization(msg) => ClientError::TransportFailure(msg),
        }
    }
}

impl From<LedgerError> for ClientError {
    fn from(err: LedgerError) -> Self {
        ClientError::TransportFailure(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Malformed(err.to_string())
    }
}
