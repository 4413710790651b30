//! Startup policy choosing between freshly piped history and the cache
//!
//! Only entry counts are compared. The cache keeps accumulated frequency and
//! recency data, so it is preferred unless the fresh history is strictly
//! larger, which protects that data when the shell's history file has been
//! truncated. It is a coarse heuristic: a cleared-then-regrown history with
//! more lines than the cache will replace it wholesale.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// Keep the piped history and overwrite the cache with it
    UseFresh,
    /// Discard the piped history and load the cache
    UseCache,
}

/// Pick the data set to keep: the larger one, the cache on ties
pub fn choose_source(fresh_count: usize, cache_count: usize) -> MergeDecision {
    if fresh_count > cache_count { MergeDecision::UseFresh } else { MergeDecision::UseCache }
}
