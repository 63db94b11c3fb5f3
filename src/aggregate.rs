//! Aggregation over the raw entry list
//!
//! Groups and stats are derived fresh on every pass from whatever the
//! feed currently holds; nothing here is cached or incrementally
//! patched, so optimistic and confirmed state can never drift apart.

use crate::types::{Entry, EntryGroup, Stats};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashSet};

/// Maximum gap between consecutive entries that still extends a streak:
/// a day and a half, in seconds
const STREAK_GAP_SECS: i64 = 129_600;

fn utc_day(posted_at: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(posted_at, 0)
        .map(|dt| dt.date_naive())
        // out-of-range timestamps collapse onto the epoch day
        .unwrap_or(NaiveDate::MIN)
}

/// Group entries by (author, UTC calendar day)
///
/// Entries within a group are ordered newest-first; groups are ordered
/// newest-first by each group's newest entry. Output order is fully
/// deterministic for a given input: the composite bucket key breaks any
/// representative-timestamp tie.
pub fn group_by_author_and_day(entries: &[Entry]) -> Vec<EntryGroup> {
    // BTreeMap keeps bucket iteration order independent of insertion order
    let mut buckets: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        let key = format!("{}-{}", entry.author.to_lowercase(), utc_day(entry.posted_at));
        buckets.entry(key).or_default().push(entry.clone());
    }

    let mut groups: Vec<(String, EntryGroup)> = buckets
        .into_iter()
        .map(|(key, mut bucket)| {
            bucket.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
            let first = &bucket[0];
            let group = EntryGroup {
                author: first.author.clone(),
                display_name: first.display_name.clone(),
                day: utc_day(first.posted_at),
                entries: bucket,
            };
            (key, group)
        })
        .collect();

    groups.sort_by(|(ka, a), (kb, b)| {
        b.representative_at()
            .cmp(&a.representative_at())
            .then_with(|| ka.cmp(kb))
    });

    groups.into_iter().map(|(_, g)| g).collect()
}

/// Derive per-author statistics from that author's entries
///
/// Stable under any input order: entries are sorted ascending before the
/// pairwise streak walk.
pub fn compute_stats(entries: &[Entry]) -> Stats {
    if entries.is_empty() {
        return Stats::default();
    }

    let mut timestamps: Vec<i64> = entries.iter().map(|e| e.posted_at).collect();
    timestamps.sort_unstable();

    let mut streak = 1;
    let mut max_streak = 1;
    let mut days: HashSet<NaiveDate> = HashSet::new();
    days.insert(utc_day(timestamps[0]));

    for pair in timestamps.windows(2) {
        days.insert(utc_day(pair[1]));
        if pair[1] - pair[0] <= STREAK_GAP_SECS {
            streak += 1;
            max_streak = max_streak.max(streak);
        } else {
            streak = 1;
        }
    }

    Stats {
        total_posts: entries.len(),
        streak_days: max_streak,
        days_active: days.len(),
        total_likes_received: entries.iter().map(|e| e.like_count).sum(),
    }
}

/// Relative-time label for a group header
///
/// Seconds, minutes and hours within the last day; the UTC calendar date
/// beyond that. Future timestamps clamp to "0s ago".
pub fn time_ago(posted_at: i64, now: i64) -> String {
    let diff = (now - posted_at).max(0);
    if diff < 60 {
        format!("{}s ago", diff)
    } else if diff < 3_600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86_400 {
        format!("{}h ago", diff / 3_600)
    } else {
        utc_day(posted_at).to_string()
    }
}
