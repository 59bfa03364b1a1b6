//! # Lookup Console
//!
//! The operator-facing client of the provenance lookup ledger. Visitors look
//! up an immutably stored record by barcode; a single operator authenticates
//! with a private key and registers new records.
//!
//! ## Architecture
//!
//! - **Credential store**: keeps the operator's secret key for the browser
//!   session in a scoped, secure, same-site cookie
//! - **Ledger client**: the external backend (`authenticate`, `lookup`,
//!   `insert`), consumed through the [`LedgerClient`] trait
//! - **Controllers**: sign-then-submit for login and insertion, plus the
//!   public lookup flow; each returns an outcome and touches no shared state
//! - **Console**: owns the session, screen state machine, notification and
//!   busy indicator, and is the single place controller outcomes are applied
//!
//! ## Invariants
//!
//! 1. Exactly one screen is active; privileged content is only rendered for a
//!    privileged session holding a live key
//! 2. At most one notification is visible; a new one cancels the previous
//!    expiry timer
//! 3. The busy indicator is cleared on every exit path of every handler

pub mod busy;
pub mod config;
pub mod console;
pub mod controllers;
pub mod credentials;
pub mod error;
pub mod form;
pub mod ledger;
pub mod notification;
pub mod prompt;
pub mod screen;
pub mod session;

pub use busy::{BusyGuard, BusyIndicator};
pub use config::ConsoleConfig;
pub use console::{Console, Content, Destination, StartupOutcome, View};
pub use controllers::{AuthController, LookupController, LookupRecord, TransactionController};
pub use credentials::{
    CookieAttributes, CookieCredentialStore, CookieJar, CredentialStore, SameSite,
};
pub use error::{ClientError, LedgerError, Result};
pub use form::{FormField, ItemForm};
pub use ledger::{LedgerCalls, LedgerClient, MemoryLedger};
pub use notification::{Expiry, Notification, NotificationKind, Notifier};
pub use prompt::{KeyPrompt, NoPrompt};
pub use screen::{Screen, ScreenMachine, Trigger};
pub use session::{SecretKey, Session};
