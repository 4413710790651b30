//! Persistent index storage
//!
//! The whole index is kept in one flat text file, one `command|frequency|last_used`
//! record per history element, rewritten atomically on every save.
//!
//! Cache location:
//! - `$XDG_CACHE_HOME/zsh-autocomplete/trie_data.txt` when `XDG_CACHE_HOME` is set
//! - `~/.cache/zsh-autocomplete/trie_data.txt` otherwise

pub mod merge;
pub mod persistence;

pub use merge::{MergeDecision, choose_source};
pub use persistence::{LoadedCache, load_cache, read_records, save_cache, write_records};
