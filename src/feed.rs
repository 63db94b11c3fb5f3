//! Board feed: ledger reads, normalization, and refresh coordination
//!
//! The board contract is the source of truth for entries; the feed only
//! ever re-reads it, never patches local copies. Re-fetches triggered by
//! different events (manual refresh, post-transaction reconcile, account
//! change) may overlap, so each refresh is stamped with a generation and
//! only the latest issued one may install its result.

use crate::error::Result;
use crate::traits::LedgerGateway;
use crate::types::{same_account, Entry};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Normalize a raw ledger response into a flat entry list
///
/// Ledger SDKs return the entry set either tuple-wrapped (`[[entry...]]`)
/// or as a bare array. Anything else normalizes to an empty list rather
/// than an error, so collaborator schema drift degrades the display
/// instead of breaking it.
pub fn normalize_entries(raw: &Value) -> Vec<Entry> {
    let items = match raw {
        Value::Array(outer) => match outer.first() {
            Some(Value::Array(inner)) => inner.as_slice(),
            _ => outer.as_slice(),
        },
        _ => {
            warn!("unrecognized entry response shape, treating as empty");
            return Vec::new();
        }
    };

    match serde_json::from_value::<Vec<Entry>>(Value::Array(items.to_vec())) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("entry list failed to decode, treating as empty: {}", err);
            Vec::new()
        }
    }
}

#[derive(Default)]
struct FeedState {
    entries: Vec<Entry>,
    last_error: Option<String>,
}

/// Last-known entry set with generation-guarded refresh
pub struct Feed {
    ledger: Arc<dyn LedgerGateway>,
    state: Mutex<FeedState>,
    /// Generation of the most recently issued refresh
    generation: AtomicU64,
}

impl Feed {
    pub fn new(ledger: Arc<dyn LedgerGateway>) -> Self {
        Self {
            ledger,
            state: Mutex::new(FeedState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Re-read the full entry set from the ledger.
    ///
    /// A result is installed only if no newer refresh was issued while
    /// this one was in flight. On a read failure the last good snapshot
    /// is kept and the error string surfaced via [`Feed::last_error`].
    pub async fn refresh(&self) -> Result<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let outcome = self.ledger.all_entries().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("discarding stale feed refresh (generation {})", generation);
            return Ok(());
        }

        let mut state = self.state.lock().await;
        match outcome {
            Ok(raw) => {
                let entries = normalize_entries(&raw);
                debug!("feed refreshed: {} entries", entries.len());
                state.entries = entries;
                state.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!("feed refresh failed, keeping last snapshot: {}", err);
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Current entry snapshot (community view)
    pub async fn entries(&self) -> Vec<Entry> {
        self.state.lock().await.entries.clone()
    }

    /// Entries authored by one account, case-insensitive (My Memories)
    pub async fn entries_by(&self, account: &str) -> Vec<Entry> {
        self.state
            .lock()
            .await
            .entries
            .iter()
            .filter(|e| same_account(&e.author, account))
            .cloned()
            .collect()
    }

    /// Error string from the most recent failed refresh, if the snapshot
    /// is stale
    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }

    /// Position of an entry within the full on-chain list, the index the
    /// like method expects
    pub async fn index_of(&self, entry: &Entry) -> Option<usize> {
        self.state.lock().await.entries.iter().position(|e| {
            e.posted_at == entry.posted_at
                && same_account(&e.author, &entry.author)
                && e.text == entry.text
        })
    }
}
