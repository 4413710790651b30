//! Stateless up/down navigation through prefix-filtered history.
//!
//! The process exits between keystrokes, so the caller holds the cursor and
//! passes it back on every call. Cursor `0` is the newest matching entry,
//! larger values walk toward the oldest, and [`ORIGINAL_CURSOR`] stands for
//! the text the user typed.

use super::store::HistoryStore;
use crate::models::{Direction, Navigation, ORIGINAL_CURSOR};

/// Take one step from `cursor` in `direction` among entries starting with `prefix`
///
/// With no matching entry the prefix is echoed back with cursor `0`. Walking
/// past the oldest entry returns to the original text; walking newer from the
/// original text wraps to the oldest entry.
pub fn navigate(store: &HistoryStore, prefix: &str, direction: Direction, cursor: i64) -> Navigation {
    let filtered: Vec<&str> = store.matching(prefix).collect();
    if filtered.is_empty() {
        return Navigation::new(prefix, 0);
    }

    let len = i64::try_from(filtered.len()).unwrap_or(i64::MAX);
    let mut cursor = match direction {
        Direction::Older => cursor.saturating_add(1),
        Direction::Newer => cursor.saturating_sub(1),
    };

    if cursor >= len {
        cursor = ORIGINAL_CURSOR;
    } else if cursor < ORIGINAL_CURSOR {
        cursor = len - 1;
    }

    if cursor == ORIGINAL_CURSOR {
        return Navigation::new(prefix, ORIGINAL_CURSOR);
    }

    // cursor is in 0..len here
    let position = (len - 1 - cursor) as usize;
    Navigation::new(filtered[position], cursor)
}
