use rand::Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::global_consts::NUM_RETRY;
use crate::helpers::{resolve_parent, split_pattern};

/// The host filesystem primitives a `ScopedTempDir` is built on.
///
/// [`OsFs`] is the real implementation. Tests and embedders can supply their own
/// to observe or fail either primitive without touching process-wide state.
pub trait HostFs {
    /// Creates a new, uniquely named directory and returns its path.
    ///
    /// # Arguments
    ///
    /// * `parent` - The directory to create it in. `None` or an empty path means the
    ///   system temporary directory.
    /// * `prefix` - The leading part of the directory name. Implementations append a
    ///   uniqueness suffix.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_unique_dir(&self, parent: Option<&Path>, prefix: &str) -> io::Result<PathBuf>;

    /// Recursively removes `path` and everything under it.
    ///
    /// # Errors
    ///
    /// Returns an error if anything could not be removed. A path that does not
    /// exist is not an error.
    fn remove_tree(&self, path: &Path) -> io::Result<()>;
}

impl<F: HostFs + ?Sized> HostFs for &F {
    fn create_unique_dir(&self, parent: Option<&Path>, prefix: &str) -> io::Result<PathBuf> {
        (**self).create_unique_dir(parent, prefix)
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        (**self).remove_tree(path)
    }
}

/// The operating system's filesystem.
///
/// Directory names are the prefix followed by a random decimal number. If the prefix
/// contains a `*`, the last `*` is replaced by the number instead, so `"build-*.d"`
/// yields names like `build-3170412298.d`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OsFs;

impl OsFs {
    /// Creates a single directory, readable only by its owner on Unix.
    fn create_private_dir(path: &Path) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(path)
    }
}

impl HostFs for OsFs {
    fn create_unique_dir(&self, parent: Option<&Path>, prefix: &str) -> io::Result<PathBuf> {
        let parent_dir = resolve_parent(parent);
        let (head, tail) = split_pattern(prefix)?;
        let mut rng = rand::rng();

        for _ in 0..NUM_RETRY {
            let name = format!("{head}{}{tail}", rng.random::<u32>());
            let full_path = parent_dir.join(name);
            // `create_dir` fails on an existing entry, so a success is ours alone.
            match Self::create_private_dir(&full_path) {
                Ok(()) => return Ok(full_path),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    trace!(path = %full_path.display(), "temporary directory name taken, retrying");
                }
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Could not generate a unique directory name",
        ))
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        match fs::remove_dir_all(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_missing_tree_is_ok() {
        let parent = tempfile::tempdir().unwrap();
        let missing = parent.path().join("never-created");
        assert!(OsFs.remove_tree(&missing).is_ok());
    }

    #[test]
    fn removes_nested_contents() {
        let parent = tempfile::tempdir().unwrap();
        let dir = OsFs.create_unique_dir(Some(parent.path()), "tree").unwrap();
        fs::create_dir_all(dir.join("a/b")).unwrap();
        fs::write(dir.join("a/b/file.txt"), b"content").unwrap();

        OsFs.remove_tree(&dir).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn missing_parent_is_reported() {
        let parent = tempfile::tempdir().unwrap();
        let err = OsFs
            .create_unique_dir(Some(parent.path().join("absent").as_path()), "x")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn directory_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let parent = tempfile::tempdir().unwrap();
        let dir = OsFs.create_unique_dir(Some(parent.path()), "").unwrap();
        let mode = fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}
