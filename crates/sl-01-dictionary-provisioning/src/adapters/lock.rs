//! # Provisioning Lock
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows).
//! Serializes provisioning of one dictionary across processes sharing a
//! destination root.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;
use thiserror::Error;
use tracing::debug;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors from provisioning locks
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created
    #[error("Failed to create lock file {}: {source}", path.display())]
    CreateFailed { path: PathBuf, source: io::Error },

    /// Another process held the lock until the timeout expired
    #[error("Dictionary lock {} held by {}", path.display(), holder(*pid))]
    AlreadyLocked { pid: Option<u32>, path: PathBuf },

    /// Failed to write PID to lock file
    #[error("Failed to write PID to lock file: {0}")]
    WriteFailed(io::Error),
}

fn holder(pid: Option<u32>) -> String {
    match pid {
        Some(p) => format!("process {}", p),
        None => "another process".to_string(),
    }
}

// =============================================================================
// PROVISIONING LOCK
// =============================================================================

/// Exclusive lock on one dictionary's lock file.
///
/// Released on drop (RAII). The lock file itself is left in place so that
/// waiters never lock an unlinked file.
///
/// # Example
///
/// ```ignore
/// let _lock = ProvisioningLock::acquire(layout.lock_path(), Duration::from_secs(30))?;
/// // provision while the lock is held
/// ```
#[derive(Debug)]
pub struct ProvisioningLock {
    /// The lock file handle (kept open to maintain lock)
    file: File,
    /// Path to the lock file
    path: PathBuf,
}

impl ProvisioningLock {
    /// Acquire the lock at `lock_path`, creating the file if needed.
    ///
    /// Retries with exponential backoff (capped at 500ms) until `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `LockError::AlreadyLocked` if another process holds the lock
    /// when the timeout expires.
    pub fn acquire(lock_path: &Path, timeout: Duration) -> Result<Self, LockError> {
        let deadline = Instant::now() + timeout;
        let mut retry_delay = Duration::from_millis(50);

        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LockError::CreateFailed {
                path: lock_path.to_path_buf(),
                source,
            })?;
        }

        loop {
            let file = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(false)
                .open(lock_path)
                .map_err(|source| LockError::CreateFailed {
                    path: lock_path.to_path_buf(),
                    source,
                })?;

            match file.try_lock_exclusive() {
                Ok(()) => {
                    let mut locked_file = file;
                    locked_file.set_len(0).map_err(LockError::WriteFailed)?;
                    writeln!(locked_file, "{}", std::process::id()).map_err(LockError::WriteFailed)?;
                    locked_file.sync_all().map_err(LockError::WriteFailed)?;

                    debug!(path = %lock_path.display(), "Provisioning lock acquired");
                    return Ok(Self {
                        file: locked_file,
                        path: lock_path.to_path_buf(),
                    });
                }
                Err(_) => {
                    if Instant::now() >= deadline {
                        return Err(LockError::AlreadyLocked {
                            pid: Self::read_existing_pid(lock_path),
                            path: lock_path.to_path_buf(),
                        });
                    }

                    drop(file);
                    std::thread::sleep(retry_delay);
                    retry_delay = (retry_delay * 2).min(Duration::from_millis(500));
                }
            }
        }
    }

    /// Get the path to the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read PID from existing lock file (for error messages)
    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for ProvisioningLock {
    fn drop(&mut self) {
        #[allow(clippy::incompatible_msrv)]
        let _ = self.file.unlock();
        debug!(path = %self.path.display(), "Provisioning lock released");
    }
}
