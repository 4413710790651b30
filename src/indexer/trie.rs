//! Arena-backed prefix tree over 7-bit ASCII command bytes.
//!
//! All nodes live in one `Vec` owned by [`PrefixIndex`] and refer to each other
//! by index, so dropping the index frees the whole tree at once regardless of
//! command length. Each node keeps a sparse list of child edges sorted by byte.

use chrono::{DateTime, Utc};

use super::ranking::RankingPolicy;
use crate::models::Entry;

/// Number of distinct byte values an edge can carry
pub const ALPHABET_SIZE: usize = 128;

/// Commands longer than this (in bytes) are not indexed
pub const MAX_COMMAND_LENGTH: usize = 1024;

type NodeId = usize;

const ROOT: NodeId = 0;

/// Ranking used to order completions
const COMPLETION_POLICY: RankingPolicy = RankingPolicy::TwoTier;

#[derive(Debug, Default)]
struct Node {
    /// Child edges sorted by byte value
    children: Vec<(u8, NodeId)>,
    entry: Option<Entry>,
}

impl Node {
    fn child(&self, byte: u8) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&byte, |(b, _)| *b)
            .ok()
            .map(|pos| self.children[pos].1)
    }

    fn attach(&mut self, byte: u8, id: NodeId) {
        if let Err(pos) = self.children.binary_search_by_key(&byte, |(b, _)| *b) {
            self.children.insert(pos, (byte, id));
        }
    }
}

fn in_alphabet(byte: u8) -> bool {
    usize::from(byte) < ALPHABET_SIZE
}

/// Prefix index mapping every inserted command to a path of bytes
#[derive(Debug)]
pub struct PrefixIndex {
    nodes: Vec<Node>,
    total_commands: usize,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self { nodes: vec![Node::default()], total_commands: 0 }
    }

    /// Number of unique commands (terminal nodes)
    pub fn total_commands(&self) -> usize {
        self.total_commands
    }

    /// Number of allocated nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_commands == 0
    }

    pub fn insert(&mut self, command: &str) {
        self.insert_at(command, Utc::now());
    }

    /// Insert `command` (or bump it if already present) as used at `now`.
    ///
    /// Bytes outside the 7-bit alphabet are skipped one by one; the rest of the
    /// command is still indexed and the full original string is kept on the
    /// terminal node. Empty commands, commands longer than
    /// [`MAX_COMMAND_LENGTH`] and commands with no indexable byte are ignored.
    /// Returns whether the command was indexed.
    pub fn insert_at(&mut self, command: &str, now: DateTime<Utc>) -> bool {
        match self.terminal_for_insert(command, now) {
            Some(entry) => {
                entry.touch(now);
                true
            }
            None => false,
        }
    }

    /// Insert `command` and overwrite its metadata with persisted values.
    ///
    /// Replaying the same record twice yields the persisted counts, not their
    /// sum. Returns whether the command was indexed.
    pub fn restore(&mut self, command: &str, frequency: u32, last_used: DateTime<Utc>) -> bool {
        match self.terminal_for_insert(command, last_used) {
            Some(entry) => {
                entry.frequency = frequency.max(1);
                entry.last_used = last_used;
                true
            }
            None => false,
        }
    }

    /// Walk or create the path for `command`, marking the last node terminal
    fn terminal_for_insert(&mut self, command: &str, now: DateTime<Utc>) -> Option<&mut Entry> {
        if command.is_empty() || command.len() > MAX_COMMAND_LENGTH {
            return None;
        }

        let mut current = ROOT;
        let mut depth = 0;
        for byte in command.bytes().filter(|b| in_alphabet(*b)) {
            current = match self.nodes[current].child(byte) {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[current].attach(byte, next);
                    next
                }
            };
            depth += 1;
        }

        if depth == 0 {
            return None;
        }

        let node = &mut self.nodes[current];
        if node.entry.is_none() {
            node.entry = Some(Entry::unused(command, now));
            self.total_commands += 1;
        }
        node.entry.as_mut()
    }

    /// True iff some inserted command starts with `prefix`.
    ///
    /// The empty prefix always exists. Prefixes containing bytes outside the
    /// alphabet are never found.
    pub fn search(&self, prefix: &str) -> bool {
        self.prefix_node(prefix).is_some()
    }

    /// Metadata for an exact command, if it was ever inserted
    pub fn entry(&self, command: &str) -> Option<&Entry> {
        self.command_node(command).and_then(|id| self.nodes[id].entry.as_ref())
    }

    pub fn update_frequency(&mut self, command: &str) -> bool {
        self.update_frequency_at(command, Utc::now())
    }

    /// Bump an existing command's usage. Never inserts.
    pub fn update_frequency_at(&mut self, command: &str, now: DateTime<Utc>) -> bool {
        let Some(id) = self.command_node(command) else {
            return false;
        };
        match self.nodes[id].entry.as_mut() {
            Some(entry) => {
                entry.touch(now);
                true
            }
            None => false,
        }
    }

    pub fn best_completion(&self, prefix: &str) -> Option<&str> {
        self.best_completion_at(prefix, Utc::now()).map(|entry| entry.command.as_str())
    }

    /// Highest scoring command under `prefix`.
    ///
    /// Ties keep the first entry met by the traversal in [`Self::entries_under`]:
    /// a command beats its own extensions, otherwise the lexicographically
    /// greater command wins.
    pub fn best_completion_at(&self, prefix: &str, now: DateTime<Utc>) -> Option<&Entry> {
        let start = self.prefix_node(prefix)?;

        let mut best: Option<(&Entry, i64)> = None;
        for entry in self.entries_under(start) {
            let score = COMPLETION_POLICY.score(entry, now);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((entry, score));
            }
        }
        best.map(|(entry, _)| entry)
    }

    /// All commands under `prefix`, best score first, then alphabetical
    pub fn completions_at(&self, prefix: &str, now: DateTime<Utc>) -> Vec<&Entry> {
        let Some(start) = self.prefix_node(prefix) else {
            return Vec::new();
        };

        let mut scored: Vec<(i64, &Entry)> =
            self.entries_under(start).map(|entry| (COMPLETION_POLICY.score(entry, now), entry)).collect();
        scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| a.command.cmp(&b.command)));
        scored.into_iter().map(|(_, entry)| entry).collect()
    }

    /// Every entry in the subtree rooted at `start`.
    ///
    /// Explicit-stack pre-order walk; children are pushed in ascending byte
    /// order so they are visited in descending order.
    fn entries_under(&self, start: NodeId) -> impl Iterator<Item = &Entry> + '_ {
        let mut stack = vec![start];
        std::iter::from_fn(move || {
            while let Some(id) = stack.pop() {
                let node = &self.nodes[id];
                stack.extend(node.children.iter().map(|(_, child)| *child));
                if let Some(entry) = node.entry.as_ref() {
                    return Some(entry);
                }
            }
            None
        })
    }

    /// Node reached by following `prefix` exactly
    fn prefix_node(&self, prefix: &str) -> Option<NodeId> {
        prefix.bytes().try_fold(ROOT, |id, byte| {
            if in_alphabet(byte) { self.nodes[id].child(byte) } else { None }
        })
    }

    /// Node for a full command, skipping bytes the way insertion does
    fn command_node(&self, command: &str) -> Option<NodeId> {
        if command.is_empty() {
            return None;
        }
        command
            .bytes()
            .filter(|b| in_alphabet(*b))
            .try_fold(ROOT, |id, byte| self.nodes[id].child(byte))
    }
}
