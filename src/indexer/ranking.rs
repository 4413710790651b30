//! Scoring of candidate commands by frequency and recency.
//!
//! Two variants exist. [`RankingPolicy::TwoTier`] is the one used for
//! completion lookups: a flat bonus for anything used within the last hour.
//! [`RankingPolicy::MultiTier`] grades recency more finely and only drives the
//! recently-used queue in [`crate::indexer::mru`].

use chrono::{DateTime, Utc};

use crate::models::Entry;

/// Points awarded per recorded use
pub const FREQUENCY_WEIGHT: i64 = 100;

/// Window (seconds) inside which the two-tier bonus applies
pub const RECENCY_WINDOW_SECS: i64 = 3600;

/// Flat bonus for commands used inside [`RECENCY_WINDOW_SECS`]
pub const RECENCY_BONUS: i64 = 50;

/// Multi-tier bonus table: (maximum age in seconds, exclusive; bonus)
const TIERED_BONUSES: [(i64, i64); 4] = [(300, 200), (1800, 100), (3600, 50), (86_400, 25)];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankingPolicy {
    /// `frequency * 100 + (50 if used within the last hour)`
    #[default]
    TwoTier,
    /// `frequency * 100 + 200/100/50/25` for 5 min / 30 min / 1 h / 1 day
    MultiTier,
}

impl RankingPolicy {
    /// Score a command from its raw usage metadata. Higher is better.
    pub fn score_parts(self, frequency: u32, last_used: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        let age_seconds = now.signed_duration_since(last_used).num_seconds();
        i64::from(frequency) * FREQUENCY_WEIGHT + self.recency_bonus(age_seconds)
    }

    /// Score an index entry at `now`
    pub fn score(self, entry: &Entry, now: DateTime<Utc>) -> i64 {
        self.score_parts(entry.frequency, entry.last_used, now)
    }

    /// Bonus for an entry last used `age_seconds` ago.
    ///
    /// Timestamps in the future produce a negative age and count as recent.
    pub fn recency_bonus(self, age_seconds: i64) -> i64 {
        match self {
            RankingPolicy::TwoTier => {
                if age_seconds < RECENCY_WINDOW_SECS {
                    RECENCY_BONUS
                } else {
                    0
                }
            }
            RankingPolicy::MultiTier => TIERED_BONUSES
                .iter()
                .find(|(max_age, _)| age_seconds < *max_age)
                .map(|(_, bonus)| *bonus)
                .unwrap_or(0),
        }
    }
}
