//! zsh-autocomplete - history-based completion engine for the shell
//!
//! This library indexes previously run shell commands and answers the two
//! questions a line editor asks on every keystroke:
//!
//! - What is the most likely completion of the current buffer? (prefix trie
//!   ranked by frequency and recency)
//! - What is the next older/newer history entry starting with the buffer?
//!   (stateless cursor navigation)
//!
//! The index is persisted as a flat `command|frequency|last_used` cache file
//! and rebuilt on every process start; the binary runs exactly one operation
//! per invocation.
//!
//! # Example
//!
//! ```no_run
//! use zsh_autocomplete::Engine;
//! use zsh_autocomplete::models::{Direction, ORIGINAL_CURSOR};
//!
//! let mut engine = Engine::from_cache("/home/alice/.cache/zsh-autocomplete/trie_data.txt");
//! engine.record_usage("git status")?;
//!
//! if let Some(completion) = engine.best_completion("git s") {
//!     println!("{}", completion);
//! }
//! let step = engine.navigate("git", Direction::Older, ORIGINAL_CURSOR);
//! println!("{}", step);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod engine;
pub mod history;
pub mod index_storage;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use engine::{Engine, InitReport, Stats};
pub use history::{HistoryStore, navigate};
pub use indexer::{PrefixIndex, RankingPolicy};
pub use models::{Direction, Entry, Navigation};
pub use utils::get_cache_file;
