//! Console configuration
//!
//! Read from `LOOKUP_*` environment variables; anything unset or unparsable
//! falls back to the default.

use std::env;
use std::time::Duration;
use tracing::warn;

use crate::credentials::{CookieAttributes, SameSite, MAX_COOKIE_AGE};

/// Delay before an auto-dismissing notification clears
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(15);

/// Cookie name under which the operator key is kept
pub const CREDENTIAL_NAME: &str = "secretKey";

/// Runtime configuration for a [`Console`](crate::Console)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Auto-dismiss delay for notifications
    pub notification_ttl: Duration,

    /// Lifetime of the stored credential; `None` lasts for the browser session
    pub credential_max_age: Option<Duration>,

    /// Whether the console is served over a secure transport
    pub secure_context: bool,

    /// Name of the credential entry
    pub credential_name: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            credential_max_age: None,
            secure_context: true,
            credential_name: CREDENTIAL_NAME.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secs) = parse_var::<u64>(&lookup, "LOOKUP_NOTIFICATION_TTL_SECS") {
            config.notification_ttl = Duration::from_secs(secs);
        }

        if let Some(secs) = parse_var::<u64>(&lookup, "LOOKUP_CREDENTIAL_MAX_AGE_SECS") {
            let max_age = Duration::from_secs(secs);
            if max_age > MAX_COOKIE_AGE {
                warn!(
                    requested_secs = secs,
                    cap_secs = MAX_COOKIE_AGE.as_secs(),
                    "Credential lifetime exceeds the cookie limit; capping it"
                );
            }
            config.credential_max_age = Some(max_age.min(MAX_COOKIE_AGE));
        }

        if let Some(secure) = parse_var::<bool>(&lookup, "LOOKUP_SECURE_CONTEXT") {
            config.secure_context = secure;
        }

        config
    }

    /// Cookie attributes for the credential entry
    ///
    /// Root path, `Secure`, `SameSite=Strict`, and the configured max age.
    pub fn cookie_attributes(&self) -> CookieAttributes {
        CookieAttributes {
            path: "/".into(),
            secure: true,
            same_site: SameSite::Strict,
            max_age: self.credential_max_age,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "Ignoring unparsable configuration value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.notification_ttl, Duration::from_secs(15));
        assert_eq!(config.credential_name, "secretKey");
        assert!(config.secure_context);
    }

    #[test]
    fn test_overrides() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[
            ("LOOKUP_NOTIFICATION_TTL_SECS", "5"),
            ("LOOKUP_CREDENTIAL_MAX_AGE_SECS", "3600"),
            ("LOOKUP_SECURE_CONTEXT", "false"),
        ]));

        assert_eq!(config.notification_ttl, Duration::from_secs(5));
        assert_eq!(config.credential_max_age, Some(Duration::from_secs(3600)));
        assert!(!config.secure_context);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[
            ("LOOKUP_NOTIFICATION_TTL_SECS", "soon"),
            ("LOOKUP_SECURE_CONTEXT", "maybe"),
        ]));

        assert_eq!(config.notification_ttl, DEFAULT_NOTIFICATION_TTL);
        assert!(config.secure_context);
    }

    #[test]
    fn test_credential_lifetime_is_capped() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[(
            "LOOKUP_CREDENTIAL_MAX_AGE_SECS",
            "18446744073709551615",
        )]));
        assert_eq!(config.credential_max_age, Some(MAX_COOKIE_AGE));
        assert_eq!(config.cookie_attributes().max_age, Some(MAX_COOKIE_AGE));
    }

    #[test]
    fn test_cookie_attributes_are_strict() {
        let attributes = ConsoleConfig::default().cookie_attributes();
        assert_eq!(attributes.path, "/");
        assert!(attributes.secure);
        assert_eq!(attributes.same_site, SameSite::Strict);
        assert_eq!(attributes.max_age, None);
    }
}
