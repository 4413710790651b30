//! The per-invocation engine context.
//!
//! An [`Engine`] owns the prefix index, the history store and the cache file
//! location. It is built once when the process starts, runs one operation and
//! is dropped on exit.
//!
//! # Error Handling Strategy
//!
//! Cache IO failures are soft: a cache that cannot be read yields an empty
//! engine and a warning, so a broken cache never breaks the user's shell.
//! Saves return their error to the caller, which decides whether to report it.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::history::{HistoryStore, navigate};
use crate::index_storage::{LoadedCache, MergeDecision, choose_source, load_cache, save_cache};
use crate::indexer::{DEFAULT_MRU_CAPACITY, PrefixIndex, RankedCommand, RecentCommands};
use crate::models::{Direction, Entry, Navigation};
use crate::parsers::read_history_lines;

/// Outcome of [`Engine::initialize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    /// Entries stored from the piped history
    pub fresh_count: usize,
    /// Records found in the existing cache
    pub cache_count: usize,
    pub decision: MergeDecision,
}

/// Summary of the loaded index
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_commands: usize,
    pub history_entries: usize,
    pub trie_nodes: usize,
    pub cache_file: PathBuf,
    pub top_command: Option<Entry>,
}

#[derive(Debug)]
pub struct Engine {
    index: PrefixIndex,
    store: HistoryStore,
    cache_file: PathBuf,
    /// The cache exists but could not be loaded; never write over it
    cache_unreadable: bool,
}

impl Engine {
    /// Empty engine persisting to `cache_file`
    pub fn new(cache_file: impl Into<PathBuf>) -> Self {
        Self {
            index: PrefixIndex::new(),
            store: HistoryStore::new(),
            cache_file: cache_file.into(),
            cache_unreadable: false,
        }
    }

    /// Load the engine from its cache only, never touching stdin
    pub fn from_cache(cache_file: impl Into<PathBuf>) -> Self {
        let cache_file = cache_file.into();
        let (loaded, cache_unreadable) = load_or_empty(&cache_file);
        Self { index: loaded.index, store: loaded.store, cache_file, cache_unreadable }
    }

    /// Build the engine from piped history and the cache, keeping the larger.
    ///
    /// With no `input` the cache is simply loaded. When the piped history wins
    /// it is written over the cache, unless the cache exists but could not be
    /// loaded. A failed write is logged and the engine still serves the fresh
    /// data.
    pub fn initialize<R: BufRead>(cache_file: impl Into<PathBuf>, input: Option<R>) -> (Self, InitReport) {
        let cache_file = cache_file.into();
        let now = Utc::now();

        let mut fresh = Self::new(cache_file.clone());
        let fresh_count = match input {
            Some(reader) => match read_history_lines(reader) {
                Ok(lines) => fresh.store.load(lines, &mut fresh.index, now),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read piped history");
                    0
                }
            },
            None => 0,
        };

        let (cached, cache_unreadable) = load_or_empty(&cache_file);
        let cache_count = cached.len();
        let decision = choose_source(fresh_count, cache_count);
        tracing::debug!(fresh_count, cache_count, ?decision, "Initializing");

        let engine = match decision {
            MergeDecision::UseFresh if cache_unreadable => {
                tracing::warn!("Cache file could not be loaded, serving piped history without saving");
                Self { cache_unreadable, ..fresh }
            }
            MergeDecision::UseFresh => {
                if let Err(e) = fresh.save() {
                    tracing::warn!(error = %e, "Failed to save fresh history to cache");
                }
                fresh
            }
            MergeDecision::UseCache => {
                Self { index: cached.index, store: cached.store, cache_file, cache_unreadable }
            }
        };

        tracing::debug!(total_commands = engine.index.total_commands(), "Initialized");
        (engine, InitReport { fresh_count, cache_count, decision })
    }

    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    /// Best ranked completion for a non-empty prefix
    pub fn best_completion(&self, prefix: &str) -> Option<&str> {
        self.best_completion_at(prefix, Utc::now())
    }

    pub fn best_completion_at(&self, prefix: &str, now: DateTime<Utc>) -> Option<&str> {
        if prefix.is_empty() {
            return None;
        }
        self.index.best_completion_at(prefix, now).map(|entry| entry.command.as_str())
    }

    /// Up to `limit` ranked completions for `prefix`
    pub fn completions(&self, prefix: &str, limit: usize) -> Vec<&Entry> {
        let mut entries = self.index.completions_at(prefix, Utc::now());
        entries.truncate(limit);
        entries
    }

    /// One step of prefix-filtered history navigation
    pub fn navigate(&self, prefix: &str, direction: Direction, cursor: i64) -> Navigation {
        navigate(&self.store, prefix, direction, cursor)
    }

    /// Record an executed command and write the cache through.
    ///
    /// Returns `Ok(false)` without saving when there is nothing to record:
    /// an empty command, or one spanning several lines that the line-based
    /// cache cannot hold. Fails without saving when the cache file exists but
    /// could not be loaded, so its records are not replaced by this one.
    pub fn record_usage(&mut self, command: &str) -> Result<bool> {
        if command.contains('\n') {
            tracing::debug!("Ignoring multi-line command");
            return Ok(false);
        }
        if !self.store.record_usage(command, &mut self.index, Utc::now()) {
            return Ok(false);
        }
        if self.cache_unreadable {
            anyhow::bail!(
                "Cache file could not be loaded, not overwriting it: {}",
                self.cache_file.display()
            );
        }
        self.save()?;
        Ok(true)
    }

    /// Commands ranked by the multi-tier recency priority
    pub fn recent(&self, limit: usize) -> Vec<RankedCommand> {
        let now = Utc::now();
        let entries = self.store.iter().filter_map(|command| self.index.entry(command));
        let queue = RecentCommands::from_entries(entries, DEFAULT_MRU_CAPACITY.max(limit), now);
        queue.top(limit).into_iter().cloned().collect()
    }

    pub fn stats(&self) -> Stats {
        let top_command = self.index.best_completion_at("", Utc::now()).cloned();
        Stats {
            total_commands: self.index.total_commands(),
            history_entries: self.store.len(),
            trie_nodes: self.index.node_count(),
            cache_file: self.cache_file.clone(),
            top_command,
        }
    }

    /// Persist the store and index to the cache file
    pub fn save(&self) -> Result<()> {
        save_cache(&self.cache_file, &self.store, &self.index)
    }
}

/// Load the cache, falling back to empty. The flag is set when loading failed.
fn load_or_empty(cache_file: &Path) -> (LoadedCache, bool) {
    match load_cache(cache_file) {
        Ok(loaded) => (loaded, false),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "Failed to load cache, starting empty");
            (LoadedCache::default(), true)
        }
    }
}
