use std::env;
use std::io;
use std::path::{self, Path, PathBuf};

use crate::global_consts::PATTERN_WILDCARD;

/// Resolves the parent directory for a new temporary directory.
/// `None` and the empty path both mean the system temporary directory.
pub(crate) fn resolve_parent(parent: Option<&Path>) -> PathBuf {
    match parent {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => env::temp_dir(),
    }
}

/// Splits a name pattern into the text before and after the random suffix.
///
/// Without a wildcard the whole pattern is the prefix.
pub(crate) fn split_pattern(pattern: &str) -> io::Result<(&str, &str)> {
    if pattern.chars().any(path::is_separator) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "pattern contains path separator",
        ));
    }
    Ok(pattern
        .rsplit_once(PATTERN_WILDCARD)
        .unwrap_or((pattern, "")))
}
