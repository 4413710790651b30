//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

/// Builder for a temporary `$XDG_CACHE_HOME` with an optional cache file
pub struct CacheDirBuilder {
    temp_dir: TempDir,
}

impl CacheDirBuilder {
    /// Create a new builder with an empty cache home
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Directory to export as `XDG_CACHE_HOME`
    pub fn cache_home(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Location the engine resolves its cache file to under this cache home
    pub fn cache_file(&self) -> PathBuf {
        self.temp_dir.path().join("zsh-autocomplete").join("trie_data.txt")
    }

    /// Write raw cache file content
    pub fn with_cache(self, content: &str) -> Self {
        self.with_cache_bytes(content.as_bytes())
    }

    /// Write cache file bytes verbatim, which need not be valid UTF-8
    pub fn with_cache_bytes(self, content: &[u8]) -> Self {
        let path = self.cache_file();
        fs::create_dir_all(path.parent().expect("cache file has a parent"))
            .expect("Failed to create cache dir");
        fs::write(path, content).expect("Failed to write cache file");
        self
    }

    /// Write cache records programmatically
    pub fn with_records(self, records: &[RecordBuilder]) -> Self {
        let content: String = records.iter().map(|r| format!("{}\n", r.to_line())).collect();
        self.with_cache(&content)
    }

    /// Read back the cache file
    pub fn read_cache(&self) -> String {
        fs::read_to_string(self.cache_file()).expect("Failed to read cache file")
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for CacheDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `command|frequency|last_used` cache lines
pub struct RecordBuilder {
    command: String,
    frequency: u32,
    last_used: i64,
}

impl RecordBuilder {
    pub fn new(command: &str) -> Self {
        Self { command: command.to_string(), frequency: 1, last_used: 1_700_000_000 }
    }

    pub fn frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn last_used(mut self, last_used: i64) -> Self {
        self.last_used = last_used;
        self
    }

    /// Mark as used `seconds` before now
    pub fn used_ago(self, seconds: i64) -> Self {
        let ts = (Utc::now() - Duration::seconds(seconds)).timestamp();
        self.last_used(ts)
    }

    pub fn to_line(&self) -> String {
        format!("{}|{}|{}", self.command, self.frequency, self.last_used)
    }
}

/// Numbered history lines `cmd-0`, `cmd-1`, ... as piped stdin content
pub fn numbered_history(prefix: &str, count: usize) -> String {
    (0..count).map(|i| format!("{}-{}\n", prefix, i)).collect()
}

/// Fixed instant used by deterministic tests
pub fn fixed_now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}
