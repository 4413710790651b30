//! Prefix index and ranking for command completion
//!
//! - [`trie`]: arena-backed prefix tree, one terminal node per unique command
//! - [`ranking`]: frequency/recency scoring used to pick completions
//! - [`mru`]: bounded most-recently-used queue with finer recency tiers

pub mod mru;
pub mod ranking;
pub mod trie;

pub use mru::{DEFAULT_MRU_CAPACITY, RankedCommand, RecentCommands};
pub use ranking::RankingPolicy;
pub use trie::{MAX_COMMAND_LENGTH, PrefixIndex};
