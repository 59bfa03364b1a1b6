//! Cookie-backed credential store
//!
//! Models the browser cookie contract the key must satisfy: a fixed name,
//! root path, `Secure` (only accepted from a secure transport context),
//! `SameSite=Strict`, and an optional bounded lifetime.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::CredentialStore;
use crate::config::ConsoleConfig;
use crate::error::{ClientError, Result};
use crate::session::SecretKey;

/// Longest lifetime a browser honours for a cookie (400 days)
pub const MAX_COOKIE_AGE: Duration = Duration::from_secs(400 * 24 * 60 * 60);

/// Cross-site policy of a cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl std::fmt::Display for SameSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SameSite::Strict => write!(f, "Strict"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

/// Attributes attached to a cookie when it is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    /// Path scope
    pub path: String,
    /// Only sent over a secure transport
    pub secure: bool,
    /// Cross-site policy
    pub same_site: SameSite,
    /// Lifetime; `None` lasts for the browser session
    pub max_age: Option<Duration>,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self {
            path: "/".into(),
            secure: true,
            same_site: SameSite::Strict,
            max_age: None,
        }
    }
}

impl CookieAttributes {
    /// Lifetime as applied, capped at [`MAX_COOKIE_AGE`]
    pub fn effective_max_age(&self) -> Option<Duration> {
        self.max_age.map(|max_age| max_age.min(MAX_COOKIE_AGE))
    }

    /// Attribute directives as they appear after the value in `Set-Cookie`
    pub fn directives(&self) -> String {
        let mut parts = vec![format!("Path={}", self.path)];
        if let Some(max_age) = self.effective_max_age() {
            parts.push(format!("Max-Age={}", max_age.as_secs()));
        }
        if self.secure {
            parts.push("Secure".into());
        }
        parts.push(format!("SameSite={}", self.same_site));
        parts.join("; ")
    }
}

struct StoredCookie {
    value: Zeroizing<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl StoredCookie {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// In-memory cookie jar for one browsing context
///
/// Enforces the browser rules the credential relies on: `Secure` cookies
/// are refused outside a secure context, `SameSite=None` requires `Secure`,
/// and expired cookies are never returned.
pub struct CookieJar {
    secure_context: bool,
    cookies: RwLock<HashMap<String, StoredCookie>>,
}

impl std::fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieJar")
            .field("secure_context", &self.secure_context)
            .finish()
    }
}

impl CookieJar {
    /// Create an empty jar
    pub fn new(secure_context: bool) -> Self {
        Self {
            secure_context,
            cookies: RwLock::new(HashMap::new()),
        }
    }

    /// Whether the jar belongs to a secure transport context
    pub fn is_secure_context(&self) -> bool {
        self.secure_context
    }

    /// Set a cookie, replacing any existing one with the same name
    pub fn set(&self, name: &str, value: &str, attributes: &CookieAttributes) -> Result<()> {
        if attributes.secure && !self.secure_context {
            return Err(ClientError::Storage(format!(
                "cookie '{}' requires a secure context",
                name
            )));
        }

        if attributes.same_site == SameSite::None && !attributes.secure {
            return Err(ClientError::Storage(format!(
                "cookie '{}' with SameSite=None must be Secure",
                name
            )));
        }

        let expires_at = match attributes.effective_max_age() {
            Some(max_age) => {
                let ttl = chrono::Duration::from_std(max_age)
                    .map_err(|e| ClientError::Storage(format!("cookie '{}': {}", name, e)))?;
                let expires_at = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
                    ClientError::Storage(format!("cookie '{}' expiry out of range", name))
                })?;
                Some(expires_at)
            }
            None => None,
        };

        let mut cookies = self
            .cookies
            .write()
            .map_err(|_| ClientError::Storage("cookie jar lock poisoned".into()))?;
        cookies.insert(
            name.to_string(),
            StoredCookie {
                value: Zeroizing::new(value.to_string()),
                expires_at,
            },
        );

        debug!(name = %name, directives = %attributes.directives(), "Cookie set");
        Ok(())
    }

    /// Read a live cookie; an expired one is evicted and reported absent
    pub fn get(&self, name: &str) -> Option<Zeroizing<String>> {
        let mut cookies = self.cookies.write().ok()?;
        let now = Utc::now();

        if cookies.get(name)?.is_expired(now) {
            cookies.remove(name);
            debug!(name = %name, "Evicted expired cookie");
            return None;
        }

        cookies.get(name).map(|cookie| cookie.value.clone())
    }

    /// Delete a cookie; returns whether one was present
    pub fn remove(&self, name: &str) -> bool {
        match self.cookies.write() {
            Ok(mut cookies) => cookies.remove(name).is_some(),
            Err(_) => false,
        }
    }
}

/// Credential store keeping the operator key in a [`CookieJar`]
pub struct CookieCredentialStore {
    jar: Arc<CookieJar>,
    name: String,
    attributes: CookieAttributes,
}

impl CookieCredentialStore {
    /// Create a store writing `name` into `jar` with the given attributes
    pub fn new(jar: Arc<CookieJar>, name: impl Into<String>, attributes: CookieAttributes) -> Self {
        Self {
            jar,
            name: name.into(),
            attributes,
        }
    }

    /// Create a store from console configuration
    pub fn from_config(jar: Arc<CookieJar>, config: &ConsoleConfig) -> Self {
        Self::new(jar, config.credential_name.clone(), config.cookie_attributes())
    }

    /// Attributes applied on save
    pub fn attributes(&self) -> &CookieAttributes {
        &self.attributes
    }
}

impl CredentialStore for CookieCredentialStore {
    fn save(&self, key: &SecretKey) -> Result<()> {
        if let Err(err) = self.jar.set(&self.name, key.expose(), &self.attributes) {
            warn!(name = %self.name, error = %err, "Operator credential not stored");
            return Err(err);
        }
        info!(name = %self.name, "Operator credential stored");
        Ok(())
    }

    fn load(&self) -> Option<SecretKey> {
        self.jar.get(&self.name).map(|value| SecretKey::new(value.as_str()))
    }

    fn clear(&self) {
        if self.jar.remove(&self.name) {
            info!(name = %self.name, "Operator credential cleared");
        }
    }

    fn description(&self) -> &str {
        "cookie credential store"
    }
}
