//! Ledger client boundary
//!
//! The ledger persists entries and verifies signatures; the console only
//! consumes it. Implement [`LedgerClient`] to connect a real backend.

pub mod memory;

pub use memory::{LedgerCalls, MemoryLedger};

use async_trait::async_trait;
use lookup_core::{Entry, InsertReply};

use crate::error::LedgerError;

/// Capabilities the ledger backend exposes to the console
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Check a detached signature over the login challenge against the
    /// registered operator key
    async fn authenticate(&self, signature_hex: &str) -> Result<bool, LedgerError>;

    /// Public read; zero or one entry is expected
    async fn lookup(&self, barcode: &str) -> Result<Vec<Entry>, LedgerError>;

    /// Privileged write; the ledger re-verifies `signature_hex` over `barcode`
    async fn insert(
        &self,
        barcode: &str,
        entry: &Entry,
        signature_hex: &str,
    ) -> Result<InsertReply, LedgerError>;

    /// Get a description of this ledger (for logging)
    fn description(&self) -> &str {
        "ledger client"
    }
}
