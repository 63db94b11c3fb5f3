//! Like orchestration
//!
//! A like is a single user-signed transaction with two clauses: approve
//! the board to spend exactly one whole token, then the like call for
//! the target entry index. The ledger applies both or neither. At most
//! one like may be in flight at a time anywhere in the client; a second
//! attempt is rejected outright, never queued.

use crate::balance::BalanceTracker;
use crate::config::{BoardConfig, METHOD_APPROVE, METHOD_LIKE, TOKEN_SCALE};
use crate::error::{BoardError, Result};
use crate::feed::Feed;
use crate::session::Session;
use crate::traits::LedgerGateway;
use crate::types::{same_account, Clause, Entry};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Lifecycle of one like attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeStatus {
    Idle,
    Checking,
    Pending,
    Success,
    Failure,
}

/// Display-layer policy: the like control is offered only for posts by
/// other accounts, and only when a signer is connected
pub fn can_like(entry: &Entry, account: Option<&str>) -> bool {
    match account {
        Some(me) => !same_account(&entry.author, me),
        None => false,
    }
}

#[derive(Default)]
struct LikeState {
    /// Entry index of the in-flight like, if any
    active: Option<usize>,
    status: Option<LikeStatus>,
    /// User-facing message for the last failed attempt
    last_error: Option<String>,
    /// Index of the last confirmed like
    last_success: Option<usize>,
}

/// Like flow: single-flight transaction sequencing plus post-confirm
/// reconciliation
pub struct LikeFlow {
    config: BoardConfig,
    session: Session,
    ledger: Arc<dyn LedgerGateway>,
    feed: Arc<Feed>,
    balance: Arc<BalanceTracker>,
    state: Mutex<LikeState>,
}

impl LikeFlow {
    pub fn new(
        config: BoardConfig,
        session: Session,
        ledger: Arc<dyn LedgerGateway>,
        feed: Arc<Feed>,
        balance: Arc<BalanceTracker>,
    ) -> Self {
        Self {
            config,
            session,
            ledger,
            feed,
            balance,
            state: Mutex::new(LikeState::default()),
        }
    }

    /// Like the entry at `index` on the board.
    ///
    /// `entry` is the record the caller believes lives at that index;
    /// its author is re-checked here in case the view rendered against
    /// a stale snapshot. No optimistic counter bump: on confirmation
    /// the feed and balance are simply re-read.
    pub async fn like(&self, index: usize, entry: &Entry) -> Result<()> {
        let account = {
            let mut state = self.state.lock().await;
            if let Some(active) = state.active {
                return Err(BoardError::Busy(format!("like for entry {} pending", active)));
            }
            state.status = Some(LikeStatus::Checking);
            state.last_error = None;
            state.last_success = None;

            let Some(account) = self.session.account() else {
                state.status = Some(LikeStatus::Idle);
                state.last_error = Some("Please connect your wallet.".to_string());
                return Err(BoardError::AuthRequired);
            };

            // Affordability gate on the last fetched balance. It can be
            // stale against a concurrent spend; the ledger still rejects
            // an underfunded transfer, so this is UX, not safety.
            let balance = self.balance.current().await;
            if balance.whole_units.unwrap_or(0) < 1 {
                state.status = Some(LikeStatus::Idle);
                state.last_error =
                    Some("You need at least 1 GRT to like. Please get more tokens.".to_string());
                return Err(BoardError::Validation("insufficient balance".into()));
            }

            // The view already hides the control for own posts; re-check
            // in case it rendered against a stale snapshot.
            if same_account(&entry.author, &account) {
                state.status = Some(LikeStatus::Idle);
                state.last_error = Some("You cannot like your own post.".to_string());
                return Err(BoardError::Validation("self-like".into()));
            }

            state.active = Some(index);
            state.status = Some(LikeStatus::Pending);
            account
        };

        let approve = Clause::call(
            self.config.token_address.clone(),
            METHOD_APPROVE,
            vec![
                json!(self.config.board_address),
                json!(TOKEN_SCALE.to_string()),
            ],
        );
        let like = Clause::call(self.config.board_address.clone(), METHOD_LIKE, vec![json!(index)]);

        let outcome = self
            .ledger
            .send(vec![approve, like], "Like a good thing and send 1 GRT")
            .await;

        match outcome {
            Ok(tx_id) => {
                debug!("like for entry {} confirmed in tx {}", index, tx_id);
                {
                    let mut state = self.state.lock().await;
                    state.active = None;
                    state.status = Some(LikeStatus::Success);
                    state.last_success = Some(index);
                }
                // Reconcile with ledger truth; failures here only leave
                // the display stale, the like itself is confirmed.
                if let Err(err) = self.feed.refresh().await {
                    warn!("feed refresh after like failed: {}", err);
                }
                self.balance.refresh(Some(&account)).await;
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                state.active = None;
                state.status = Some(LikeStatus::Failure);
                // forward the collaborator's message verbatim when there
                // is one; write failures are the only place we do this
                state.last_error = Some(match &err {
                    BoardError::Ledger(msg) if !msg.is_empty() => msg.clone(),
                    _ => "Failed to like post".to_string(),
                });
                Err(err)
            }
        }
    }

    /// Index of the in-flight like, if any
    pub async fn pending_index(&self) -> Option<usize> {
        self.state.lock().await.active
    }

    pub async fn status(&self) -> Option<LikeStatus> {
        self.state.lock().await.status
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }

    pub async fn last_success(&self) -> Option<usize> {
        self.state.lock().await.last_success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Emotion;

    fn entry(author: &str) -> Entry {
        Entry {
            author: author.into(),
            posted_at: 1_700_000_000,
            text: "a good thing".into(),
            emotion: Emotion::Grateful,
            like_count: 0,
            display_name: "nick".into(),
        }
    }

    #[test]
    fn like_control_hidden_for_own_posts() {
        let mine = entry("0xAbC");
        assert!(!can_like(&mine, Some("0xabc")));
        assert!(can_like(&mine, Some("0xdef")));
        assert!(!can_like(&mine, None));
    }
}
