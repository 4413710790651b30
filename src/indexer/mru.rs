//! Bounded most-recently-used command queue.
//!
//! Commands are ranked with [`RankingPolicy::MultiTier`]. Priorities are
//! computed when an entry is inserted, not on every read. A full queue only
//! admits a command that outranks its lowest priority entry, which is evicted.

use chrono::{DateTime, Utc};

use super::ranking::RankingPolicy;
use crate::models::Entry;

/// Default number of commands tracked
pub const DEFAULT_MRU_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCommand {
    pub command: String,
    pub frequency: u32,
    pub last_used: DateTime<Utc>,
    pub priority: i64,
}

impl RankedCommand {
    fn new(command: &str, frequency: u32, last_used: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let priority = RankingPolicy::MultiTier.score_parts(frequency, last_used, now);
        Self { command: command.to_string(), frequency, last_used, priority }
    }
}

#[derive(Debug, Clone)]
pub struct RecentCommands {
    entries: Vec<RankedCommand>,
    capacity: usize,
}

impl Default for RecentCommands {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MRU_CAPACITY)
    }
}

impl RecentCommands {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity), capacity: capacity.max(1) }
    }

    /// Build a queue from index entries, keeping the best `capacity` of them
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a Entry>,
        capacity: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let mut queue = Self::with_capacity(capacity);
        for entry in entries {
            queue.insert(&entry.command, entry.frequency, entry.last_used, now);
        }
        queue
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite a command's metadata.
    ///
    /// When the queue is full the lowest priority entry is evicted, unless the
    /// newcomer ranks no higher than it, in which case the newcomer is dropped.
    pub fn insert(
        &mut self,
        command: &str,
        frequency: u32,
        last_used: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        let ranked = RankedCommand::new(command, frequency, last_used, now);

        if let Some(pos) = self.position(command) {
            self.entries[pos] = ranked;
            return;
        }

        if self.entries.len() >= self.capacity {
            let Some(lowest) = self.lowest_position() else {
                return;
            };
            if ranked.priority <= self.entries[lowest].priority {
                tracing::trace!(dropped = %ranked.command, "MRU queue full");
                return;
            }
            tracing::trace!(evicted = %self.entries[lowest].command, "MRU queue full");
            self.entries.swap_remove(lowest);
        }
        self.entries.push(ranked);
    }

    /// Up to `limit` commands, highest priority first, ties most recent first
    pub fn top(&self, limit: usize) -> Vec<&RankedCommand> {
        let mut ranked: Vec<&RankedCommand> = self.entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.last_used.cmp(&a.last_used))
                .then_with(|| a.command.cmp(&b.command))
        });
        ranked.truncate(limit);
        ranked
    }

    fn position(&self, command: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.command == command)
    }

    fn lowest_position(&self) -> Option<usize> {
        self.entries.iter().enumerate().min_by_key(|(_, e)| e.priority).map(|(pos, _)| pos)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn commands(queue: &RecentCommands) -> Vec<&str> {
        queue.top(usize::MAX).into_iter().map(|r| r.command.as_str()).collect()
    }

    #[test]
    fn test_insert_ranks_by_priority() {
        let mut queue = RecentCommands::default();
        queue.insert("ls", 1, now() - Duration::days(3), now());
        queue.insert("cargo test", 2, now() - Duration::seconds(30), now());

        let top = queue.top(1);
        assert_eq!(top[0].command, "cargo test");
        assert_eq!(top[0].priority, 400);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_insert_existing_overwrites() {
        let mut queue = RecentCommands::default();
        queue.insert("ls", 1, now(), now());
        queue.insert("ls", 9, now(), now());

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.top(1)[0].frequency, 9);
    }

    #[test]
    fn test_eviction_drops_lowest_priority() {
        let mut queue = RecentCommands::with_capacity(2);
        queue.insert("old", 1, now() - Duration::days(10), now());
        queue.insert("busy", 10, now() - Duration::days(10), now());
        queue.insert("fresh", 1, now(), now());

        assert_eq!(commands(&queue), vec!["busy", "fresh"]);
    }

    #[test]
    fn test_full_queue_rejects_lower_ranked_newcomer() {
        let mut queue = RecentCommands::with_capacity(2);
        let old = now() - Duration::days(10);
        queue.insert("a", 10, old, now());
        queue.insert("b", 9, old, now());
        queue.insert("c", 1, old, now());

        assert_eq!(commands(&queue), vec!["a", "b"]);
    }

    #[test]
    fn test_full_queue_keeps_incumbent_on_equal_priority() {
        let mut queue = RecentCommands::with_capacity(1);
        queue.insert("first", 3, now() - Duration::days(10), now());
        queue.insert("second", 3, now() - Duration::days(10), now());

        assert_eq!(commands(&queue), vec!["first"]);
    }

    #[test]
    fn test_from_entries_keeps_best_regardless_of_order() {
        let old = now() - Duration::days(9);
        let entries: Vec<Entry> = (1..=5)
            .rev()
            .map(|f| Entry { command: format!("cmd-{}", f), frequency: f, last_used: old })
            .chain(std::iter::once(Entry { command: "tail".to_string(), frequency: 1, last_used: old }))
            .collect();
        let queue = RecentCommands::from_entries(&entries, 3, now());

        assert_eq!(commands(&queue), vec!["cmd-5", "cmd-4", "cmd-3"]);
    }

    #[test]
    fn test_top_limits_and_orders() {
        let entries = vec![
            Entry { command: "vim".to_string(), frequency: 1, last_used: now() },
            Entry { command: "git".to_string(), frequency: 5, last_used: now() - Duration::days(9) },
            Entry { command: "ssh".to_string(), frequency: 1, last_used: now() - Duration::days(9) },
        ];
        let queue = RecentCommands::from_entries(&entries, 10, now());

        let top: Vec<&str> = queue.top(2).into_iter().map(|r| r.command.as_str()).collect();
        assert_eq!(top, vec!["git", "vim"]);
    }
}
