use std::fmt;

use clap::ValueEnum;

/// Cursor value meaning "showing the original, unmodified text"
pub const ORIGINAL_CURSOR: i64 = -1;

/// Direction of a history navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Walk toward older entries (the "up" key)
    #[value(alias = "up")]
    Older,
    /// Walk toward newer entries, back to the original text (the "down" key)
    #[value(alias = "down")]
    Newer,
}

/// Result of one navigation step: the text to display and the cursor the
/// caller must hand back on the next call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub text: String,
    pub cursor: i64,
}

impl Navigation {
    pub fn new(text: impl Into<String>, cursor: i64) -> Self {
        Self { text: text.into(), cursor }
    }
}

/// Wire form used by the line editor: `<command>|<cursor>`
impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.text, self.cursor)
    }
}
