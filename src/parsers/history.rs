use std::io::BufRead;

use anyhow::{Context, Result};

/// Read raw history lines from `reader` until end of stream
///
/// Lines are split on `\n` only and decoded lossily, so a history file with a
/// stray non-UTF-8 byte still loads. Terminator and blank-line handling is
/// left to [`crate::history::HistoryStore::load`].
pub fn read_history_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut lossy_count = 0;

    for chunk in reader.split(b'\n') {
        let bytes = chunk.context("Failed to read line from history input")?;
        match String::from_utf8(bytes) {
            Ok(line) => lines.push(line),
            Err(e) => {
                lossy_count += 1;
                lines.push(String::from_utf8_lossy(e.as_bytes()).into_owned());
            }
        }
    }

    if lossy_count > 0 {
        tracing::warn!(lossy_count, "History input contained invalid UTF-8 lines");
    }
    tracing::debug!(lines = lines.len(), "Read history input");

    Ok(lines)
}
