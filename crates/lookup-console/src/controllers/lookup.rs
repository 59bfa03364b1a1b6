//! Public lookup by barcode

use lookup_core::Entry;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::ledger::LedgerClient;

/// A looked-up entry prepared for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRecord {
    pub barcode: String,
    pub name: String,
    pub weight_mil: u64,
    pub year: u64,
    /// Plain colour label, e.g. `Black`
    pub colour: String,
}

impl LookupRecord {
    fn from_entry(barcode: &str, entry: Entry) -> Self {
        Self {
            barcode: barcode.to_string(),
            colour: entry.colour.label().to_string(),
            name: entry.name,
            weight_mil: entry.weight_mil,
            year: entry.year,
        }
    }
}

/// Reads entries from the ledger; needs no key
pub struct LookupController {
    ledger: Arc<dyn LedgerClient>,
}

impl LookupController {
    /// Create a controller over `ledger`
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// Fetch the first entry stored under `barcode`
    ///
    /// An empty result is `LookupEmpty`; a failed call is `TransportFailure`.
    pub async fn lookup(&self, barcode: &str) -> Result<LookupRecord> {
        let entries = self.ledger.lookup(barcode).await.map_err(|e| {
            warn!(barcode = %barcode, error = %e, "Lookup call failed");
            ClientError::from(e)
        })?;

        match entries.into_iter().next() {
            Some(entry) => {
                info!(barcode = %barcode, "Lookup matched");
                Ok(LookupRecord::from_entry(barcode, entry))
            }
            None => {
                info!(barcode = %barcode, "Lookup returned no entry");
                Err(ClientError::LookupEmpty(barcode.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use lookup_core::{Colour, SigningSeed};

    fn ledger() -> Arc<MemoryLedger> {
        let seed = SigningSeed::from_bytes(&[5u8; 32]).unwrap();
        let entry = Entry::new("Rolex", 150, Colour::Black, 2020);
        Arc::new(
            MemoryLedger::new(seed.public_key())
                .with_entry("ABC123", &entry)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_lookup_decodes_colour_label() {
        let controller = LookupController::new(ledger());
        let record = controller.lookup("ABC123").await.unwrap();

        assert_eq!(record.name, "Rolex");
        assert_eq!(record.weight_mil, 150);
        assert_eq!(record.year, 2020);
        assert_eq!(record.colour, "Black");
    }

    #[tokio::test]
    async fn test_lookup_empty() {
        let controller = LookupController::new(ledger());
        assert_eq!(
            controller.lookup("ZZZ").await,
            Err(ClientError::LookupEmpty("ZZZ".into()))
        );
    }

    #[tokio::test]
    async fn test_lookup_transport_failure() {
        let ledger = ledger();
        ledger.set_offline(true);
        let controller = LookupController::new(ledger);

        let result = controller.lookup("ABC123").await;
        assert!(matches!(result, Err(ClientError::TransportFailure(_))));
    }
}
