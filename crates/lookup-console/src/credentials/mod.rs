//! Credential persistence for the operator key
//!
//! The store holds the key for the duration of a browser session. It never
//! validates the key; that happens in the signer when the key is used.

pub mod cookie;

pub use cookie::{CookieAttributes, CookieCredentialStore, CookieJar, SameSite, MAX_COOKIE_AGE};

use crate::error::Result;
use crate::session::SecretKey;

/// Scoped persistence for the operator's secret key
pub trait CredentialStore: Send + Sync {
    /// Persist the key, replacing any previous value
    fn save(&self, key: &SecretKey) -> Result<()>;

    /// The stored key, if present and not expired
    fn load(&self) -> Option<SecretKey>;

    /// Delete the stored key; succeeds whether or not one exists
    fn clear(&self);

    /// Get a description of this store (for logging)
    fn description(&self) -> &str {
        "credential store"
    }
}
