//! Collaborator seams
//!
//! The SDK core never touches a wire protocol directly. Each external
//! collaborator is consumed through one narrow async trait, and ledger
//! responses cross the seam as raw `serde_json::Value` so that every
//! shape assumption lives in a single normalization function on this
//! side (see `feed` and `balance`).

use crate::error::Result;
use crate::types::Clause;
use async_trait::async_trait;
use serde_json::Value;

/// Ledger access: reads and signed multi-clause writes
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Full entry set, in whatever shape the ledger SDK returns it
    async fn all_entries(&self) -> Result<Value>;

    /// Token balance for an address, raw response shape
    async fn token_balance(&self, address: &str) -> Result<Value>;

    /// Submit one user-signed transaction carrying the given clauses.
    ///
    /// The ledger applies all clauses or none. Returns a transaction id
    /// on confirmation; rejection or revert surfaces as an error.
    async fn send(&self, clauses: Vec<Clause>, comment: &str) -> Result<String>;
}

/// Identity/nickname store for the active account
#[async_trait]
pub trait NameDirectory: Send + Sync {
    async fn current_name(&self, account: &str) -> Result<Option<String>>;

    async fn save_name(&self, account: &str, name: &str) -> Result<()>;
}

/// Durable key-value storage scoped to the local client installation
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;
}

/// Sink for the abstract "authentication required" signal
///
/// How the signal is presented (modal, redirect) is the embedder's
/// concern.
pub trait AuthPrompt: Send + Sync {
    fn request_login(&self);
}
