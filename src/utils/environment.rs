use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Directory under the cache root holding the engine's files
pub const CACHE_DIR_NAME: &str = "zsh-autocomplete";

/// Name of the flat cache file
pub const CACHE_FILE_NAME: &str = "trie_data.txt";

/// Resolve the cache file from the environment
///
/// `$XDG_CACHE_HOME/zsh-autocomplete/trie_data.txt` when `XDG_CACHE_HOME` is
/// set and non-empty, else `$HOME/.cache/zsh-autocomplete/trie_data.txt`.
pub fn get_cache_file() -> Result<PathBuf> {
    let xdg = env::var("XDG_CACHE_HOME").ok();
    let home = env::var_os("HOME").map(PathBuf::from).or_else(dirs::home_dir);
    resolve_cache_file(xdg.as_deref(), home).context("Failed to resolve cache file location")
}

/// Pure resolver behind [`get_cache_file`], separated for testing
pub(crate) fn resolve_cache_file(xdg_cache_home: Option<&str>, home: Option<PathBuf>) -> Result<PathBuf> {
    let cache_root = match xdg_cache_home {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => match home {
            Some(home) if !home.as_os_str().is_empty() => home.join(".cache"),
            _ => bail!("HOME environment variable not set"),
        },
    };
    Ok(cache_root.join(CACHE_DIR_NAME).join(CACHE_FILE_NAME))
}
