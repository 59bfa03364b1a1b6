//! # Lookup Core
//!
//! Pure building blocks for the provenance lookup client:
//!
//! - **Key codec**: hexadecimal <-> raw byte conversion for secret keys and signatures
//! - **Signer**: Ed25519 keypairs derived from a 32-byte seed, detached signatures
//!   over UTF-8 messages
//! - **Entry model**: the ledger record and its tagged-variant colour encoding
//!
//! Nothing in this crate performs I/O or holds state between calls.

pub mod codec;
pub mod entry;
pub mod error;
pub mod signer;

pub use codec::{bytes_to_hex, hex_to_bytes};
pub use entry::{Colour, Entry, InsertRejection, InsertReply};
pub use error::{CoreError, Result};
pub use signer::{sign, PublicKey, SigningSeed, AUTH_CHALLENGE, SEED_LENGTH, SIGNATURE_LENGTH};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
