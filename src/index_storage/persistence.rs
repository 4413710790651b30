//! Cache persistence: load/save with atomic writes

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::history::HistoryStore;
use crate::indexer::PrefixIndex;
use crate::parsers::{CacheRecord, RecordError};
use crate::utils::{ensure_private_dir, validate_file_size};

/// Store and index rebuilt from a cache file
#[derive(Debug, Default)]
pub struct LoadedCache {
    pub store: HistoryStore,
    pub index: PrefixIndex,
    /// Lines that could not be decoded and were skipped
    pub skipped: usize,
}

impl LoadedCache {
    /// Number of records read back
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Write one record per history element, in history order
///
/// Commands missing from the index fall back to frequency 1 used at `now`.
pub fn write_records<W: Write>(
    writer: &mut W,
    store: &HistoryStore,
    index: &PrefixIndex,
    now: DateTime<Utc>,
) -> std::io::Result<()> {
    for command in store.iter() {
        let (frequency, last_used) =
            index.entry(command).map(|e| (e.frequency, e.last_used)).unwrap_or((1, now));
        writeln!(writer, "{}", CacheRecord::format(command, frequency, last_used))?;
    }
    Ok(())
}

/// Rebuild a store and index from cache lines
///
/// Every record is replayed into a fresh index so duplicates restore the
/// persisted counts instead of summing them. Malformed records are skipped;
/// lines that are not valid UTF-8 are decoded lossily and kept.
pub fn read_records<R: BufRead>(reader: R, now: DateTime<Utc>) -> Result<LoadedCache> {
    let mut loaded = LoadedCache::default();
    let mut lossy_count = 0;

    for (line_num, chunk) in reader.split(b'\n').enumerate() {
        let bytes = chunk.context("Failed to read line from cache file")?;
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                lossy_count += 1;
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let record = match line.parse::<CacheRecord>() {
            Ok(record) => record,
            Err(RecordError::Empty) => continue,
            Err(e) => {
                tracing::warn!(line = line_num + 1, error = %e, "Skipping malformed cache line");
                loaded.skipped += 1;
                continue;
            }
        };

        match record.usage {
            Some(usage) => {
                loaded.index.restore(&record.command, usage.frequency, usage.last_used);
            }
            None => {
                loaded.index.insert_at(&record.command, now);
            }
        }
        loaded.store.push(record.command);
    }

    if lossy_count > 0 {
        tracing::warn!(lossy_count, "Cache file contained invalid UTF-8 lines");
    }

    Ok(loaded)
}

/// Load the cache at `path`; a missing file is an empty cache
pub fn load_cache(path: &Path) -> Result<LoadedCache> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No cache file yet");
            return Ok(LoadedCache::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open cache file: {}", path.display()));
        }
    };
    validate_file_size(&file, path)?;

    let loaded = read_records(BufReader::new(file), Utc::now())?;
    tracing::debug!(
        path = %path.display(),
        records = loaded.len(),
        commands = loaded.index.total_commands(),
        skipped = loaded.skipped,
        "Loaded cache"
    );
    Ok(loaded)
}

/// Overwrite the cache at `path` with the current store and index
///
/// Writes to a sibling temp file and renames it over the cache, so readers see
/// either the old or the new file. The cache directory is created owner-only.
pub fn save_cache(path: &Path, store: &HistoryStore, index: &PrefixIndex) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        ensure_private_dir(dir)?;
    }

    let mut temp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let file = File::create(&temp_path)
        .with_context(|| format!("Failed to create cache temp file: {}", temp_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, store, index, Utc::now())
        .and_then(|()| writer.flush())
        .context("Failed to write cache temp file")?;
    drop(writer);

    fs::rename(&temp_path, path).context("Failed to rename cache temp file")?;

    tracing::debug!(path = %path.display(), records = store.len(), "Saved cache");
    Ok(())
}
