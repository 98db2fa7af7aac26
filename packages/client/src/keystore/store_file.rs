//! Scoped ownership of the persisted keystore file

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{self, Result};

/// The on-disk copy of the keystore.
///
/// The file holds an unencrypted private key, so it is removed when the guard
/// is dropped on every exit path, or earlier through [`StoreFile::remove`].
#[derive(Debug)]
pub struct StoreFile {
    path: PathBuf,
    removed: bool,
}

impl StoreFile {
    /// Write `contents` to `path`, replacing any existing file.
    ///
    /// A leftover file is removed rather than truncated so the new one always
    /// starts with owner-only permissions. The guard exists before the first
    /// byte is written, so a failed write does not leave a partial file behind.
    pub(crate) fn create(path: &Path, contents: &[u8]) -> Result<Self> {
        remove_if_present(path).map_err(|e| error::store_io(path, e))?;

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(path).map_err(|e| error::store_io(path, e))?;
        let guard = Self {
            path: path.to_path_buf(),
            removed: false,
        };

        file.write_all(contents)
            .and_then(|()| file.sync_all())
            .map_err(|e| error::store_io(path, e))?;

        tracing::debug!("Persisted keystore to {} ({} bytes)", path.display(), contents.len());
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now and report the outcome.
    ///
    /// A file that is already gone counts as removed.
    pub fn remove(mut self) -> Result<()> {
        self.removed = true;
        remove_if_present(&self.path).map_err(|e| error::store_io(&self.path, e))
    }
}

impl Drop for StoreFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match remove_if_present(&self.path) {
            Ok(()) => tracing::debug!("Removed keystore file {}", self.path.display()),
            Err(e) => tracing::warn!(
                "Failed to remove keystore file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
