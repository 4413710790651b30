//! Command-line dispatch: one verb per process invocation

pub mod commands;

pub use commands::{Cli, Commands, run};
