//! Ed25519 signing over seed-derived keypairs
//!
//! The operator's secret key is a 32-byte Ed25519 seed. Every signature
//! re-derives the keypair from that seed and drops it when done; no derived
//! secret material outlives the call that produced it.
//!
//! Ed25519 is deterministic: the same seed and message always produce the
//! same 64-byte signature.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroizing;

use crate::codec::{bytes_to_hex, hex_to_bytes};
use crate::error::{CoreError, Result};

/// Length of a secret key seed in bytes
pub const SEED_LENGTH: usize = 32;

/// Length of a detached Ed25519 signature in bytes
pub const SIGNATURE_LENGTH: usize = 64;

/// Fixed message signed to prove key possession at login
pub const AUTH_CHALLENGE: &str = "login";

/// Sign a UTF-8 message with a hex-encoded 32-byte seed
///
/// Returns the detached signature as lowercase hex.
pub fn sign(message: &str, secret_key_hex: &str) -> Result<String> {
    let seed = SigningSeed::from_hex(secret_key_hex)?;
    Ok(seed.sign(message))
}

/// A validated 32-byte signing seed
///
/// The seed bytes are wiped on drop.
#[derive(Clone)]
pub struct SigningSeed {
    bytes: Zeroizing<[u8; SEED_LENGTH]>,
}

impl std::fmt::Debug for SigningSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSeed")
            .field("bytes", &"[redacted]")
            .finish()
    }
}

impl SigningSeed {
    /// Decode a seed from hex, enforcing the 32-byte length
    pub fn from_hex(secret_key_hex: &str) -> Result<Self> {
        let decoded = Zeroizing::new(hex_to_bytes(secret_key_hex)?);
        Self::from_bytes(&decoded)
    }

    /// Build a seed from raw bytes, enforcing the 32-byte length
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; SEED_LENGTH] =
            bytes.try_into().map_err(|_| CoreError::InvalidKeyLength {
                expected: SEED_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(Self {
            bytes: Zeroizing::new(array),
        })
    }

    /// Hex form of the seed, wiped when dropped
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(bytes_to_hex(self.bytes.as_ref()))
    }

    /// Public half of the keypair derived from this seed
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: self.signing_key().verifying_key(),
        }
    }

    /// Produce a detached signature over the UTF-8 bytes of `message`
    pub fn sign(&self, message: &str) -> String {
        let signature = self.signing_key().sign(message.as_bytes());
        bytes_to_hex(&signature.to_bytes())
    }

    // SigningKey zeroizes itself on drop
    fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.bytes)
    }
}

/// Ed25519 public key for verifying detached signatures
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    verifying_key: VerifyingKey,
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_hex()).finish()
    }
}

impl PublicKey {
    /// Create a public key from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| CoreError::InvalidKeyLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        let verifying_key = VerifyingKey::from_bytes(&array)?;
        Ok(Self { verifying_key })
    }

    /// Create a public key from hex
    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_bytes(&hex_to_bytes(hex)?)
    }

    /// Raw verifying key bytes
    pub fn to_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// Lowercase hex of the verifying key
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.to_bytes())
    }

    /// Verify a hex-encoded detached signature over `message`
    pub fn verify(&self, message: &str, signature_hex: &str) -> Result<()> {
        let bytes = hex_to_bytes(signature_hex)?;
        let bytes: [u8; SIGNATURE_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
            CoreError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LENGTH,
                bytes.len()
            ))
        })?;
        let signature = Signature::from_bytes(&bytes);
        self.verifying_key.verify(message.as_bytes(), &signature)?;
        Ok(())
    }
}
