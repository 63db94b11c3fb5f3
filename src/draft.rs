//! Draft persistence across an authentication interruption
//!
//! When a user hits Submit while unauthenticated, the three input slots
//! are parked in the durable key-value store and restored the next time
//! the posting view initializes, whether or not the login succeeded. The
//! store holds at most one draft under a fixed key.

use crate::error::Result;
use crate::traits::KvStore;
use crate::types::GoodThingSlot;
use std::sync::Arc;
use tracing::{debug, warn};

/// Well-known slot name for the single pending draft
pub const DRAFT_KEY: &str = "three_good_things_draft";

/// Single-slot draft store over the durable key-value collaborator
pub struct DraftStore {
    kv: Arc<dyn KvStore>,
}

impl DraftStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Persist the current three input slots
    pub async fn save(&self, slots: &[GoodThingSlot; 3]) -> Result<()> {
        let payload = serde_json::to_string(slots)?;
        debug!("saving draft before login interruption");
        self.kv.set(DRAFT_KEY, &payload).await
    }

    /// Read and clear the pending draft.
    ///
    /// Returns the slots exactly once; a second call reports absent.
    /// A stored value that is not exactly three `{text, emotion}`
    /// records is treated as absent and discarded silently.
    pub async fn take(&self) -> Result<Option<[GoodThingSlot; 3]>> {
        let Some(payload) = self.kv.get(DRAFT_KEY).await? else {
            return Ok(None);
        };
        self.kv.delete(DRAFT_KEY).await?;

        match serde_json::from_str::<[GoodThingSlot; 3]>(&payload) {
            Ok(slots) => Ok(Some(slots)),
            Err(err) => {
                warn!("discarding malformed draft: {}", err);
                Ok(None)
            }
        }
    }

    /// Drop any pending draft without reading it
    pub async fn discard(&self) -> Result<()> {
        self.kv.delete(DRAFT_KEY).await
    }
}
