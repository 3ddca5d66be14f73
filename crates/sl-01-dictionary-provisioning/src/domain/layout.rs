//! Dictionary layout under a destination root
//!
//! ```text
//! <destination_root>/
//! ├── <name>/            installed dictionary (completeness signal)
//! ├── .<name>.partial-*/ staging directories while copying
//! └── .<name>.lock       advisory lock file
//! ```

use std::path::{Path, PathBuf};

/// Validated dictionary name plus the paths derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryLayout {
    name: String,
    destination_root: PathBuf,
    installed_path: PathBuf,
    lock_path: PathBuf,
}

impl DictionaryLayout {
    /// Derive the layout for `name` under `destination_root`.
    ///
    /// Returns the rejection reason if the name cannot be used as a single
    /// path segment.
    pub fn new(name: &str, destination_root: &Path) -> Result<Self, String> {
        Self::validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            destination_root: destination_root.to_path_buf(),
            installed_path: destination_root.join(name),
            lock_path: destination_root.join(format!(".{}.lock", name)),
        })
    }

    /// Check that `name` is a non-empty, single, non-hidden path segment.
    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("dictionary name is empty".to_string());
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(format!("dictionary name {:?} contains a path separator", name));
        }
        // Leading dots are reserved for staging and lock files
        if name.starts_with('.') {
            return Err(format!("dictionary name {:?} must not start with '.'", name));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asset folder holding the dictionary inside the bundle.
    pub fn asset_prefix(&self) -> &str {
        &self.name
    }

    pub fn installed_path(&self) -> &Path {
        &self.installed_path
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// Staging directory for one copy attempt. Each attempt gets its own
    /// directory so concurrent provisioners never write into each other's.
    pub fn staging_path(&self, attempt: &str) -> PathBuf {
        self.destination_root
            .join(format!(".{}.partial-{}", self.name, attempt))
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }
}
