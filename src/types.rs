//! Core data model for the Gratitude Board
//!
//! `Entry` mirrors the on-chain record tuple; serde renames map the Rust
//! field names onto the contract's field names so ledger responses
//! deserialize directly. Numeric fields tolerate both JSON numbers and
//! decimal strings, since ledger SDKs disagree on how they encode uint256.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// The closed set of emotions an entry can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Grateful,
    Peaceful,
}

impl Emotion {
    /// Wire form used by the board contract
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Grateful => "grateful",
            Emotion::Peaceful => "peaceful",
        }
    }

    /// Label shown in the UI ("peaceful" displays as "Calm")
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Grateful => "Grateful",
            Emotion::Peaceful => "Calm",
        }
    }
}

fn de_i64_lenient<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(i64),
        Str(String),
    }
    match NumOrStr::deserialize(de)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn de_u64_lenient<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u64),
        Str(String),
    }
    match NumOrStr::deserialize(de)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// One confirmed good-thing record on the board
///
/// Immutable once confirmed; `like_count` only changes through confirmed
/// like transactions, and `display_name` is a snapshot taken at posting
/// time that is never retroactively updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Account that posted the entry (case-insensitive identity)
    #[serde(rename = "user")]
    pub author: String,
    /// Ledger-assigned seconds since epoch
    #[serde(rename = "timestamp", deserialize_with = "de_i64_lenient")]
    pub posted_at: i64,
    /// The good thing itself
    #[serde(rename = "message")]
    pub text: String,
    #[serde(rename = "feeling")]
    pub emotion: Emotion,
    #[serde(rename = "likes", deserialize_with = "de_u64_lenient")]
    pub like_count: u64,
    /// Author's chosen name at the time of posting
    #[serde(rename = "nickname")]
    pub display_name: String,
}

impl Entry {
    /// UTC calendar date this entry was posted on
    pub fn utc_day(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.posted_at, 0).map(|dt| dt.date_naive())
    }
}

/// Case-insensitive account identity comparison
pub fn same_account(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// One of the three input slots on the posting view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoodThingSlot {
    pub text: String,
    pub emotion: Option<Emotion>,
}

impl GoodThingSlot {
    /// A slot counts toward submission only with non-empty text and a
    /// chosen emotion
    pub fn filled(&self) -> bool {
        !self.text.trim().is_empty() && self.emotion.is_some()
    }
}

/// Entries by one author on one UTC calendar day, newest-first
#[derive(Debug, Clone, PartialEq)]
pub struct EntryGroup {
    pub author: String,
    /// Snapshot name of the newest entry in the group
    pub display_name: String,
    pub day: NaiveDate,
    pub entries: Vec<Entry>,
}

impl EntryGroup {
    /// Representative timestamp: the newest entry's `posted_at`
    pub fn representative_at(&self) -> i64 {
        self.entries.first().map(|e| e.posted_at).unwrap_or(0)
    }
}

/// Per-author derived statistics, recomputed from scratch on every read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_posts: usize,
    /// Longest run of entries spaced at most 1.5 days apart
    pub streak_days: usize,
    /// Distinct UTC calendar days with at least one post
    pub days_active: usize,
    pub total_likes_received: u64,
}

/// One atomic call within a multi-clause transaction
///
/// Abstract form only; encoding to the ledger's wire format is the
/// gateway collaborator's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Target contract address
    pub contract: String,
    /// Contract method name
    pub method: String,
    pub args: Vec<serde_json::Value>,
    /// Native token value carried by the call (always 0 here)
    pub value: u64,
}

impl Clause {
    pub fn call(contract: impl Into<String>, method: impl Into<String>, args: Vec<serde_json::Value>) -> Self {
        Self {
            contract: contract.into(),
            method: method.into(),
            args,
            value: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_deserializes_from_chain_field_names() {
        let raw = serde_json::json!({
            "user": "0xAbC",
            "timestamp": "1700000000",
            "message": "found a round potato",
            "feeling": "happy",
            "likes": 2,
            "nickname": "mika"
        });
        let entry: Entry = serde_json::from_value(raw).unwrap();
        assert_eq!(entry.author, "0xAbC");
        assert_eq!(entry.posted_at, 1_700_000_000);
        assert_eq!(entry.emotion, Emotion::Happy);
        assert_eq!(entry.like_count, 2);
    }

    #[test]
    fn slot_filled_requires_text_and_emotion() {
        let mut slot = GoodThingSlot::default();
        assert!(!slot.filled());
        slot.text = "   ".into();
        slot.emotion = Some(Emotion::Grateful);
        assert!(!slot.filled());
        slot.text = "my socks matched".into();
        assert!(slot.filled());
    }

    #[test]
    fn account_identity_ignores_case() {
        assert!(same_account("0xAbCd", "0xabcd"));
        assert!(!same_account("0xAbCd", "0xabce"));
    }
}
