//! Entry registration: sign the barcode, then insert

use lookup_core::{sign, Entry, InsertRejection, InsertReply};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::form::ItemForm;
use crate::ledger::LedgerClient;
use crate::session::SecretKey;

/// Submits signed inserts to the ledger
pub struct TransactionController {
    ledger: Arc<dyn LedgerClient>,
}

impl TransactionController {
    /// Create a controller over `ledger`
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// Validate the form contents and submit them as a new entry
    ///
    /// Checks, in order: a live key (`Unauthorized`), a non-blank barcode,
    /// the colour (`InvalidColour`), then the numeric fields.
    pub async fn submit_form(&self, key: Option<&SecretKey>, form: &ItemForm) -> Result<()> {
        let key = key.ok_or_else(|| ClientError::Unauthorized("no operator key held".into()))?;

        let barcode = form.barcode.trim();
        if barcode.is_empty() {
            return Err(ClientError::InvalidField {
                field: "barcode",
                reason: "barcode is required".into(),
            });
        }

        let entry = form.to_entry()?;
        self.submit_entry(key, barcode, &entry).await
    }

    /// Sign `barcode` and insert `entry` under it
    ///
    /// The signature covers the barcode only, binding the authorization to
    /// that identifier.
    pub async fn submit_entry(&self, key: &SecretKey, barcode: &str, entry: &Entry) -> Result<()> {
        let signature = sign(barcode, key.expose())?;

        let reply = self
            .ledger
            .insert(barcode, entry, &signature)
            .await
            .map_err(|e| {
                warn!(barcode = %barcode, error = %e, "Insert call failed");
                ClientError::from(e)
            })?;

        match reply {
            InsertReply::Ok(()) => {
                info!(barcode = %barcode, name = %entry.name, "Entry registered");
                Ok(())
            }
            InsertReply::Err(InsertRejection::DuplicateKey) => {
                warn!(barcode = %barcode, "Insert refused: barcode already registered");
                Err(ClientError::DuplicateKey(barcode.to_string()))
            }
            InsertReply::Err(InsertRejection::InvalidSignature) => {
                warn!(barcode = %barcode, "Insert refused: signature not accepted");
                Err(ClientError::Unauthorized(
                    "ledger rejected the barcode signature".into(),
                ))
            }
        }
    }
}
