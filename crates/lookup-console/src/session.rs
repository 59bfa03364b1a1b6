//! Operator session
//!
//! The session is the single authority on whether the console is
//! privileged. It can only become privileged together with a live key, and
//! ending it wipes the key.

use tracing::info;
use zeroize::Zeroizing;

/// The operator's secret key as entered: hex text, not yet validated
///
/// Validation belongs to the signer at time of use. The text is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Zeroizing<String>);

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([redacted])")
    }
}

impl SecretKey {
    /// Wrap hex text supplied by the operator or the credential store
    pub fn new(hex: impl Into<String>) -> Self {
        Self(Zeroizing::new(hex.into()))
    }

    /// Wrap operator input, treating blank input as absent
    pub fn non_blank(hex: &str) -> Option<Self> {
        if hex.trim().is_empty() {
            None
        } else {
            Some(Self::new(hex))
        }
    }

    /// The hex text, for signing or persisting
    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Session state: the privileged flag plus the live key
#[derive(Debug, Default)]
pub struct Session {
    key: Option<SecretKey>,
    privileged: bool,
}

impl Session {
    /// Create an unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether privileged content may be shown
    pub fn is_privileged(&self) -> bool {
        self.privileged && self.key.is_some()
    }

    /// The live key, if the session holds one
    pub fn key(&self) -> Option<&SecretKey> {
        self.key.as_ref()
    }

    /// Record a successful authentication
    pub(crate) fn establish(&mut self, key: SecretKey) {
        self.key = Some(key);
        self.privileged = true;
        info!("Operator session established");
    }

    /// Drop the key and privilege; returns whether a session was active
    pub(crate) fn end(&mut self) -> bool {
        let was_privileged = self.is_privileged();
        self.key = None;
        self.privileged = false;
        if was_privileged {
            info!("Operator session ended");
        }
        was_privileged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unprivileged() {
        let session = Session::new();
        assert!(!session.is_privileged());
        assert!(session.key().is_none());
    }

    #[test]
    fn test_establish_and_end() {
        let mut session = Session::new();
        session.establish(SecretKey::new("ab".repeat(32)));

        assert!(session.is_privileged());
        assert_eq!(session.key().unwrap().expose(), "ab".repeat(32));

        assert!(session.end());
        assert!(!session.is_privileged());
        assert!(session.key().is_none());
        assert!(!session.end());
    }

    #[test]
    fn test_blank_keys_are_absent() {
        assert!(SecretKey::non_blank("").is_none());
        assert!(SecretKey::non_blank("   ").is_none());
        assert!(SecretKey::non_blank("00ff").is_some());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = SecretKey::new("deadbeef");
        assert!(!format!("{:?}", key).contains("deadbeef"));
    }
}
