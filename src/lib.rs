//! Gratitude Board SDK
//!
//! Client-side core for an on-chain "three good things" journal. Users
//! post short daily entries tagged with an emotion; the community can
//! like them, which transfers one token per like. The board contract is
//! the source of truth: this crate reads the full entry set, derives
//! groups and stats fresh on every pass, and sequences the multi-clause
//! transactions for posting and liking.
//!
//! Wallet signing, contract execution, the nickname store and all
//! presentation are external collaborators behind the traits in
//! [`traits`]; the SDK only orchestrates them.
//!
//! # Example
//!
//! ```rust,ignore
//! use gratitude_sdk::{BoardConfig, Feed, SubmitFlow, Session, Emotion};
//!
//! let config = BoardConfig::new(BOARD_ADDR, TOKEN_ADDR);
//! let feed = Feed::new(ledger.clone());
//! feed.refresh().await?;
//!
//! let groups = gratitude_sdk::group_by_author_and_day(&feed.entries().await);
//! let stats = gratitude_sdk::compute_stats(&feed.entries_by(&me).await);
//!
//! let submit = SubmitFlow::new(config, session, ledger, names, drafts, auth);
//! submit.restore_draft().await?;
//! submit.set_text(0, "I found a perfectly round potato.").await;
//! submit.set_emotion(0, Emotion::Happy).await;
//! submit.submit().await?;
//! ```

// Aggregation over the raw entry list
pub mod aggregate;

// Token balance normalization and caching
pub mod balance;

// Contract addresses and method names
pub mod config;

// Draft persistence across a login interruption
pub mod draft;

// Error types
pub mod error;

// Ledger reads and refresh coordination
pub mod feed;

// Like transaction orchestration
pub mod like;

// Nickname handling
pub mod names;

// Reactive account state
pub mod session;

// Submit transaction orchestration
pub mod submit;

// Collaborator seams
pub mod traits;

// Core data model
pub mod types;

// Re-export the working surface
pub use aggregate::{compute_stats, group_by_author_and_day, time_ago};
pub use balance::{normalize_balance, BalanceTracker, BalanceView, BALANCE_UNAVAILABLE};
pub use config::{BoardConfig, TOKEN_SCALE};
pub use draft::{DraftStore, DRAFT_KEY};
pub use error::{BoardError, Result};
pub use feed::{normalize_entries, Feed};
pub use like::{can_like, LikeFlow, LikeStatus};
pub use names::NicknameBook;
pub use session::Session;
pub use submit::{SubmitFlow, SubmitStatus};
pub use traits::{AuthPrompt, KvStore, LedgerGateway, NameDirectory};
pub use types::{same_account, Clause, Emotion, Entry, EntryGroup, GoodThingSlot, Stats};
