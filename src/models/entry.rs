use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Usage metadata carried by every terminal node of the prefix index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub command: String,
    pub frequency: u32,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub last_used: DateTime<Utc>,
}

impl Entry {
    /// Create an entry that has not been used yet (frequency 0)
    ///
    /// The index bumps the frequency right after creating a terminal node,
    /// so a freshly inserted command always ends up with frequency 1.
    pub(crate) fn unused(command: &str, now: DateTime<Utc>) -> Self {
        Self { command: command.to_string(), frequency: 0, last_used: now }
    }

    /// Record one use at `now`
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.frequency = self.frequency.saturating_add(1);
        self.last_used = now;
    }
}
