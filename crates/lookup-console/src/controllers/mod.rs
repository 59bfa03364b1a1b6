//! Ledger-facing controllers
//!
//! Each controller performs one sign-then-submit (or public read) flow and
//! returns its outcome. None of them touches session, screen or
//! notification state; the [`Console`](crate::Console) applies outcomes.

pub mod auth;
pub mod lookup;
pub mod transaction;

pub use auth::AuthController;
pub use lookup::{LookupController, LookupRecord};
pub use transaction::TransactionController;
