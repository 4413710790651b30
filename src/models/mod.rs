//! Data models shared by the index, the history store and the CLI.
//!
//! - [`Entry`] - Usage metadata (frequency, last use) for one unique command
//! - [`Direction`] - Older/newer step for history navigation
//! - [`Navigation`] - Text plus cursor returned by one navigation step

pub mod entry;
pub mod navigation;

pub use entry::Entry;
pub use navigation::{Direction, Navigation, ORIGINAL_CURSOR};
