use std::borrow::Cow;
use std::env;
use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Largest cache file the loader accepts: 64MB
const MAX_CACHE_FILE_BYTES: u64 = 64 * 1024 * 1024;

/// Create `dir` (and parents) readable and writable by the owner only
pub fn ensure_private_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(dir)
        .with_context(|| format!("Failed to create cache directory: {}", dir.display()))
}

/// Reject cache files over the size limit
///
/// Takes the already opened handle so the size checked is the size read.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    if metadata.len() > MAX_CACHE_FILE_BYTES {
        bail!(
            "Cache file too large: {} ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_CACHE_FILE_BYTES
        );
    }

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref()).filter(|h| !h.is_empty());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && let Some(rest) = path_str.strip_prefix(home)
        && (rest.is_empty() || rest.starts_with('/'))
    {
        return format!("~{rest}");
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
