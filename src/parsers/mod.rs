//! Line parsers for the two inputs the engine consumes
//!
//! # Error Handling Strategy
//!
//! Both inputs are parsed with **graceful degradation**, since a bad line must
//! never break the user's shell:
//!
//! - **Raw history** ([`history`]): every line is accepted; invalid UTF-8 is
//!   decoded lossily and counted in a warning.
//!
//! - **Cache records** ([`cache_record`]): a line that cannot be decoded
//!   yields a typed [`RecordError`]; the loader logs it and moves on to the
//!   next line.

pub mod cache_record;
pub mod history;

pub use cache_record::{CacheRecord, RecordError, Usage};
pub use history::read_history_lines;
