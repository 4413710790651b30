use chrono::{DateTime, Utc};

use crate::indexer::PrefixIndex;

/// Raw commands in first-seen order, the source for up/down navigation
///
/// Kept in lockstep with a [`PrefixIndex`]: every command appended here is
/// also inserted there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStore {
    commands: Vec<String>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load raw lines, feeding each stored line to `index`.
    ///
    /// Line terminators are trimmed and blank lines skipped; duplicates are
    /// kept. Returns the number of lines stored.
    pub fn load<I, S>(&mut self, lines: I, index: &mut PrefixIndex, now: DateTime<Utc>) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.commands.len();
        for line in lines {
            let command = line.as_ref().trim_end_matches(['\n', '\r']);
            if command.trim().is_empty() {
                continue;
            }
            index.insert_at(command, now);
            self.commands.push(command.to_string());
        }
        self.commands.len() - before
    }

    /// Record one execution of `command`.
    ///
    /// Bumps the command in `index` and appends it here only if it was never
    /// seen. Returns false for an empty command.
    pub fn record_usage(&mut self, command: &str, index: &mut PrefixIndex, now: DateTime<Utc>) -> bool {
        if command.is_empty() {
            return false;
        }
        index.insert_at(command, now);
        if !self.contains(command) {
            self.commands.push(command.to_string());
        }
        true
    }

    /// Append without touching any index (cache replay)
    pub(crate) fn push(&mut self, command: String) {
        self.commands.push(command);
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands.iter().any(|c| c == command)
    }

    /// Commands starting with `prefix`, oldest first
    pub fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.iter().filter(move |c| c.starts_with(prefix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
