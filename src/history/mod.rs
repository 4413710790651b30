//! Ordered command history and the navigation protocol built on it

pub mod navigation;
pub mod store;

pub use navigation::navigate;
pub use store::HistoryStore;
