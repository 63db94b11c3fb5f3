//! Submit orchestration for the posting view
//!
//! Owns the three input slots and the short-lived state machine around
//! a batched post transaction. Gating order matters: local validation
//! first, then the authentication gate (which parks the slots in the
//! draft store instead of erroring), then the display-name gate. Only
//! after all three does the ledger see anything.

use crate::config::{BoardConfig, METHOD_POST_MULTIPLE};
use crate::draft::DraftStore;
use crate::error::{BoardError, Result};
use crate::session::Session;
use crate::traits::{AuthPrompt, LedgerGateway, NameDirectory};
use crate::types::{Clause, GoodThingSlot};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Lifecycle of one submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Pending,
    Success,
    Reverted,
}

struct SubmitState {
    slots: [GoodThingSlot; 3],
    status: SubmitStatus,
    /// User-facing message for the last attempt
    notice: Option<String>,
    /// How many slots the last successful submission carried
    posted_count: usize,
}

impl Default for SubmitState {
    fn default() -> Self {
        Self {
            slots: Default::default(),
            status: SubmitStatus::Idle,
            notice: None,
            posted_count: 0,
        }
    }
}

/// Drops the busy flag even on early returns
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Submit flow: three input slots plus the posting state machine
pub struct SubmitFlow {
    config: BoardConfig,
    session: Session,
    ledger: Arc<dyn LedgerGateway>,
    names: Arc<dyn NameDirectory>,
    drafts: DraftStore,
    auth: Arc<dyn AuthPrompt>,
    state: Mutex<SubmitState>,
    /// At most one submit in flight; a second attempt is rejected
    busy: AtomicBool,
}

impl SubmitFlow {
    pub fn new(
        config: BoardConfig,
        session: Session,
        ledger: Arc<dyn LedgerGateway>,
        names: Arc<dyn NameDirectory>,
        drafts: DraftStore,
        auth: Arc<dyn AuthPrompt>,
    ) -> Self {
        Self {
            config,
            session,
            ledger,
            names,
            drafts,
            auth,
            state: Mutex::new(SubmitState::default()),
            busy: AtomicBool::new(false),
        }
    }

    /// Consume a parked draft into the input slots, if one exists.
    ///
    /// Called once when the posting view initializes; the draft is
    /// cleared regardless of whether login succeeded in between.
    pub async fn restore_draft(&self) -> Result<bool> {
        match self.drafts.take().await? {
            Some(slots) => {
                self.state.lock().await.slots = slots;
                debug!("restored draft into input slots");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn set_text(&self, index: usize, text: impl Into<String>) {
        if index < 3 {
            self.state.lock().await.slots[index].text = text.into();
        }
    }

    pub async fn set_emotion(&self, index: usize, emotion: crate::types::Emotion) {
        if index < 3 {
            self.state.lock().await.slots[index].emotion = Some(emotion);
        }
    }

    pub async fn slots(&self) -> [GoodThingSlot; 3] {
        self.state.lock().await.slots.clone()
    }

    /// Slots that would be submitted right now
    pub async fn filled_count(&self) -> usize {
        self.state.lock().await.slots.iter().filter(|s| s.filled()).count()
    }

    pub async fn status(&self) -> SubmitStatus {
        self.state.lock().await.status
    }

    pub async fn notice(&self) -> Option<String> {
        self.state.lock().await.notice.clone()
    }

    pub async fn posted_count(&self) -> usize {
        self.state.lock().await.posted_count
    }

    /// Attempt to post the filled slots as one batched transaction.
    ///
    /// Returns the number of slots posted on success. Validation
    /// failures and the authentication branch never reach the ledger;
    /// a ledger failure leaves the slot text intact for retry.
    pub async fn submit(&self) -> Result<usize> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(BoardError::Busy("submit already pending".into()));
        }
        let _busy = BusyGuard(&self.busy);

        let (filled, slots_snapshot) = {
            let state = self.state.lock().await;
            let filled: Vec<GoodThingSlot> =
                state.slots.iter().filter(|s| s.filled()).cloned().collect();
            (filled, state.slots.clone())
        };

        if filled.is_empty() {
            self.state.lock().await.notice = Some(
                "Please add at least one good thing. Share something positive from your day!"
                    .to_string(),
            );
            return Err(BoardError::Validation("no filled slots".into()));
        }

        // Re-read at the gate; a session captured earlier could have
        // expired in the meantime.
        let Some(account) = self.session.account() else {
            if let Err(err) = self.drafts.save(&slots_snapshot).await {
                warn!("failed to park draft before login: {}", err);
            }
            self.auth.request_login();
            return Err(BoardError::AuthRequired);
        };

        let nickname = self
            .names
            .current_name(&account)
            .await
            .ok()
            .flatten()
            .map(|n| n.trim().to_string())
            .unwrap_or_default();
        if nickname.is_empty() {
            self.state.lock().await.notice =
                Some("Please enter your nickname (username)".to_string());
            return Err(BoardError::Validation("display name missing".into()));
        }

        {
            let mut state = self.state.lock().await;
            state.status = SubmitStatus::Pending;
            state.notice = None;
        }

        // Parallel arrays for the filled slots only; unfilled slots are
        // excluded, never padded.
        let messages: Vec<String> = filled.iter().map(|s| s.text.trim().to_string()).collect();
        let feelings: Vec<String> = filled
            .iter()
            .filter_map(|s| s.emotion.map(|e| e.as_str().to_string()))
            .collect();
        let nicknames: Vec<String> = filled.iter().map(|_| nickname.clone()).collect();

        let clause = Clause::call(
            self.config.board_address.clone(),
            METHOD_POST_MULTIPLE,
            vec![json!(messages), json!(feelings), json!(nicknames)],
        );
        let comment = format!("{} posted good things!", account);

        match self.ledger.send(vec![clause], &comment).await {
            Ok(tx_id) => {
                let count = filled.len();
                debug!("posted {} good things in tx {}", count, tx_id);
                let mut state = self.state.lock().await;
                state.status = SubmitStatus::Success;
                state.posted_count = count;
                state.slots = Default::default();
                state.notice = Some(format!(
                    "You've shared {} good thing{} with the community.",
                    count,
                    if count > 1 { "s" } else { "" }
                ));
                Ok(count)
            }
            Err(err) => {
                warn!("post transaction failed: {}", err);
                let mut state = self.state.lock().await;
                state.status = SubmitStatus::Reverted;
                // slots stay as typed so nothing is lost on retry
                state.notice = Some("Failed to post. Please try again.".to_string());
                Err(err)
            }
        }
    }
}
