//! In-memory reference ledger
//!
//! Behaves like the production backend: it verifies the operator's login
//! and barcode signatures, stores entries in their JSON transport shape,
//! refuses duplicate barcodes, and can be taken offline to simulate
//! transport failures. Every call is counted.

use async_trait::async_trait;
use lookup_core::{Entry, InsertRejection, InsertReply, PublicKey, AUTH_CHALLENGE};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::LedgerClient;
use crate::error::LedgerError;

/// Number of calls received per capability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerCalls {
    pub authenticate: usize,
    pub lookup: usize,
    pub insert: usize,
}

/// In-memory ledger keyed by barcode
#[derive(Debug)]
pub struct MemoryLedger {
    operator: PublicKey,
    entries: RwLock<HashMap<String, serde_json::Value>>,
    offline: AtomicBool,
    authenticate_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
    insert_calls: AtomicUsize,
}

impl MemoryLedger {
    /// Create an empty ledger that trusts `operator`
    pub fn new(operator: PublicKey) -> Self {
        Self {
            operator,
            entries: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
            authenticate_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
            insert_calls: AtomicUsize::new(0),
        }
    }

    /// Seed an entry without a signature check
    pub fn with_entry(
        mut self,
        barcode: impl Into<String>,
        entry: &Entry,
    ) -> Result<Self, LedgerError> {
        let record = serde_json::to_value(entry)?;
        self.entries.get_mut().insert(barcode.into(), record);
        Ok(self)
    }

    /// The operator key this ledger trusts
    pub fn operator(&self) -> PublicKey {
        self.operator
    }

    /// Simulate losing (or regaining) the connection
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
        info!(offline, "Ledger connectivity changed");
    }

    /// Calls received so far
    pub fn calls(&self) -> LedgerCalls {
        LedgerCalls {
            authenticate: self.authenticate_calls.load(Ordering::SeqCst),
            lookup: self.lookup_calls.load(Ordering::SeqCst),
            insert: self.insert_calls.load(Ordering::SeqCst),
        }
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the ledger holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn ensure_online(&self) -> Result<(), LedgerError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(LedgerError::Transport("ledger unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerClient for MemoryLedger {
    async fn authenticate(&self, signature_hex: &str) -> Result<bool, LedgerError> {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        let accepted = self.operator.verify(AUTH_CHALLENGE, signature_hex).is_ok();
        debug!(accepted, "Login signature checked");
        Ok(accepted)
    }

    async fn lookup(&self, barcode: &str) -> Result<Vec<Entry>, LedgerError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        let entries = self.entries.read().await;
        entries
            .get(barcode)
            .map(|record| serde_json::from_value(record.clone()).map_err(LedgerError::from))
            .into_iter()
            .collect()
    }

    async fn insert(
        &self,
        barcode: &str,
        entry: &Entry,
        signature_hex: &str,
    ) -> Result<InsertReply, LedgerError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        if let Err(e) = self.operator.verify(barcode, signature_hex) {
            warn!(barcode = %barcode, error = %e, "Insert signature rejected");
            return Ok(InsertReply::Err(InsertRejection::InvalidSignature));
        }

        let mut entries = self.entries.write().await;
        if entries.contains_key(barcode) {
            debug!(barcode = %barcode, "Insert refused: barcode exists");
            return Ok(InsertReply::Err(InsertRejection::DuplicateKey));
        }

        entries.insert(barcode.to_string(), serde_json::to_value(entry)?);
        info!(barcode = %barcode, "Entry inserted");
        Ok(InsertReply::Ok(()))
    }

    fn description(&self) -> &str {
        "in-memory ledger"
    }
}
