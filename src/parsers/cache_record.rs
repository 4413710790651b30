//! Line format of the cache file: `command|frequency|last_used`
//!
//! Fields are split from the right, so a command containing `|` survives a
//! save/load cycle unchanged. A line whose two trailing fields are not a
//! frequency and a unix timestamp is read as a bare command with no stored
//! metadata.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Field separator within a cache line
pub const FIELD_SEPARATOR: char = '|';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("empty line")]
    Empty,

    #[error("record has usage fields but no command")]
    MissingCommand,

    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

/// Persisted usage counters for one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub frequency: u32,
    pub last_used: DateTime<Utc>,
}

/// One decoded cache line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    pub command: String,
    /// `None` when the line carried no usable metadata
    pub usage: Option<Usage>,
}

impl CacheRecord {
    /// Encode a record as a cache line (without the trailing newline)
    pub fn format(command: &str, frequency: u32, last_used: DateTime<Utc>) -> String {
        format!(
            "{command}{sep}{frequency}{sep}{ts}",
            sep = FIELD_SEPARATOR,
            ts = last_used.timestamp()
        )
    }
}

impl FromStr for CacheRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            return Err(RecordError::Empty);
        }

        let mut fields = line.rsplitn(3, FIELD_SEPARATOR);
        let (Some(ts_field), Some(freq_field), Some(command)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Ok(Self { command: line.to_string(), usage: None });
        };

        let (Ok(frequency), Ok(timestamp)) =
            (freq_field.trim().parse::<u32>(), ts_field.trim().parse::<i64>())
        else {
            return Ok(Self { command: line.to_string(), usage: None });
        };

        if command.is_empty() {
            return Err(RecordError::MissingCommand);
        }

        let last_used = DateTime::from_timestamp(timestamp, 0)
            .ok_or(RecordError::TimestampOutOfRange(timestamp))?;

        Ok(Self {
            command: command.to_string(),
            usage: Some(Usage { frequency: frequency.max(1), last_used }),
        })
    }
}
