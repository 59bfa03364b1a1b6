//! Login: prove possession of the operator key

use lookup_core::{sign, AUTH_CHALLENGE};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::ledger::LedgerClient;
use crate::prompt::KeyPrompt;
use crate::session::SecretKey;

/// Signs the login challenge and submits it to the ledger
pub struct AuthController {
    ledger: Arc<dyn LedgerClient>,
}

impl AuthController {
    /// Create a controller over `ledger`
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// Pick the supplied key, or ask the operator when it is blank or absent
    ///
    /// Fails with `MissingKey` when no non-blank key is obtained.
    pub async fn resolve_key(
        &self,
        provided: Option<&str>,
        prompt: &dyn KeyPrompt,
    ) -> Result<SecretKey> {
        if let Some(key) = provided.and_then(SecretKey::non_blank) {
            return Ok(key);
        }

        match prompt.request_key().await {
            Some(entered) => SecretKey::non_blank(&entered).ok_or(ClientError::MissingKey),
            None => Err(ClientError::MissingKey),
        }
    }

    /// Sign the login challenge with `key` and ask the ledger to accept it
    ///
    /// Key errors are raised before the ledger is contacted. On acceptance
    /// the key is handed back for the caller to keep.
    pub async fn authenticate(&self, key: SecretKey) -> Result<SecretKey> {
        let signature = sign(AUTH_CHALLENGE, key.expose())?;

        let accepted = self.ledger.authenticate(&signature).await.map_err(|e| {
            warn!(ledger = self.ledger.description(), error = %e, "Login call failed");
            ClientError::from(e)
        })?;

        if accepted {
            info!(ledger = self.ledger.description(), "Login signature accepted");
            Ok(key)
        } else {
            warn!(ledger = self.ledger.description(), "Login signature rejected");
            Err(ClientError::Unauthorized(
                "ledger rejected the login signature".into(),
            ))
        }
    }
}
