use std::fmt::{Debug, Formatter};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, warn};

use crate::error::{TempError, TempResult};
use crate::host_fs::{HostFs, OsFs};

/// A uniquely named temporary directory that is removed exactly once, on request.
///
/// The handle is either *holding* a directory it created or *inert*. [`close`](ScopedTempDir::close)
/// moves it from holding to inert, and every later call is a no-op.
///
/// # ***IMPORTANT***:
///
/// Dropping a `ScopedTempDir` does **not** remove the directory. Call
/// [`close`](ScopedTempDir::close) or [`must_close`](ScopedTempDir::must_close), or
/// hold a [`guard`](ScopedTempDir::guard) for scope-based cleanup.
pub struct ScopedTempDir<F: HostFs = OsFs> {
    /// The directory currently held, if any.
    path: Option<PathBuf>,
    /// The primitives used to create and remove the directory.
    fs: F,
}

impl ScopedTempDir {
    /// Creates a new temporary directory in the system temporary directory.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The leading part of the directory name. See [`OsFs`] for the naming rules.
    ///
    /// # Errors
    ///
    /// Returns [`TempError::Create`] if the directory cannot be created.
    pub fn create(prefix: &str) -> TempResult<Self> {
        Self::create_with(OsFs, None, prefix)
    }

    /// Creates a new temporary directory inside `parent`.
    ///
    /// An empty `parent` means the system temporary directory.
    ///
    /// # Errors
    ///
    /// Returns [`TempError::Create`] if the directory cannot be created, for example
    /// because `parent` does not exist.
    pub fn create_in<P: AsRef<Path>>(parent: P, prefix: &str) -> TempResult<Self> {
        Self::create_with(OsFs, Some(parent.as_ref()), prefix)
    }

    /// Returns an inert handle that holds no directory.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            path: None,
            fs: OsFs,
        }
    }
}

impl<F: HostFs> ScopedTempDir<F> {
    /// Creates a new temporary directory using the given filesystem primitives.
    ///
    /// # Errors
    ///
    /// Returns [`TempError::Create`] carrying whatever `fs` reported.
    pub fn create_with(fs: F, parent: Option<&Path>, prefix: &str) -> TempResult<Self> {
        let path = fs
            .create_unique_dir(parent, prefix)
            .map_err(TempError::Create)?;
        debug!(path = %path.display(), "created scoped temporary directory");
        Ok(Self {
            path: Some(path),
            fs,
        })
    }

    /// Returns an inert handle bound to the given filesystem primitives.
    pub fn empty_with(fs: F) -> Self {
        Self { path: None, fs }
    }

    /// Returns the path of the held directory, or `None` once closed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Checks if the handle still holds a directory.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.path.is_some()
    }

    /// Removes the held directory and everything in it.
    ///
    /// The handle is inert once this returns, whether removal succeeded or not, so a
    /// failed removal is never retried. Closing an inert handle touches nothing and
    /// returns `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns [`TempError::Remove`] if the directory could not be fully removed.
    pub fn close(&mut self) -> TempResult<()> {
        let Some(path) = self.path.take() else {
            return Ok(());
        };
        match self.fs.remove_tree(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed scoped temporary directory");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to remove scoped temporary directory");
                Err(TempError::Remove(e))
            }
        }
    }

    /// Closes the handle, treating failure as a bug.
    ///
    /// Meant for tests and short-lived tools where a directory that cannot be removed
    /// is an environment problem, not something to recover from. Use
    /// [`close`](ScopedTempDir::close) to handle the error instead.
    ///
    /// # Panics
    ///
    /// Panics with the removal error's message if [`close`](ScopedTempDir::close) fails.
    #[track_caller]
    pub fn must_close(&mut self) {
        if let Err(e) = self.close() {
            panic!("failed to close temporary directory: {e}");
        }
    }

    /// Consumes the handle and returns the directory path without removing it.
    #[must_use]
    pub fn into_path(mut self) -> Option<PathBuf> {
        self.path.take()
    }

    /// Returns a guard that closes this handle when it goes out of scope.
    ///
    /// The guard calls [`must_close`](ScopedTempDir::must_close) on drop. If the thread
    /// is already panicking, a removal error is logged and discarded instead.
    pub fn guard(&mut self) -> CloseGuard<'_, F> {
        CloseGuard {
            dir: self,
            armed: true,
        }
    }
}

impl<F: HostFs + Default> Default for ScopedTempDir<F> {
    fn default() -> Self {
        Self::empty_with(F::default())
    }
}

impl<F: HostFs> Debug for ScopedTempDir<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedTempDir")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<F: HostFs> AsRef<Path> for ScopedTempDir<F> {
    fn as_ref(&self) -> &Path {
        // An inert handle has no directory; hand out the empty path rather than panic.
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }
}

/// Closes a [`ScopedTempDir`] when dropped. Created by [`ScopedTempDir::guard`].
pub struct CloseGuard<'a, F: HostFs = OsFs> {
    dir: &'a mut ScopedTempDir<F>,
    armed: bool,
}

impl<F: HostFs> CloseGuard<'_, F> {
    /// Disarms the guard, leaving the directory for the handle's owner to close.
    pub fn dismiss(mut self) {
        self.armed = false;
    }
}

impl<F: HostFs> Deref for CloseGuard<'_, F> {
    type Target = ScopedTempDir<F>;
    fn deref(&self) -> &Self::Target {
        &*self.dir
    }
}

impl<F: HostFs> DerefMut for CloseGuard<'_, F> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.dir
    }
}

impl<F: HostFs> Drop for CloseGuard<'_, F> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if thread::panicking() {
            if let Err(e) = self.dir.close() {
                warn!(error = %e, "discarding removal error while unwinding");
            }
        } else {
            self.dir.must_close();
        }
    }
}
