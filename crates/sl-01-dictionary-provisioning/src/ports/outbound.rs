//! Outbound Ports (Driven Ports)
//!
//! The read-only, hierarchical asset store dictionaries are copied from.
//! Paths are relative and `/`-separated (e.g. `mil2525c/symbols/a.dat`).

use crate::error::AssetError;

/// Kind of an entry in the asset store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    File,
    Directory,
}

/// A direct child of an asset directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetEntry {
    /// Entry name (a single path segment)
    pub name: String,
    pub kind: AssetKind,
}

impl AssetEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AssetKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AssetKind::Directory,
        }
    }
}

/// Read-only asset bundle (Driven Port)
pub trait AssetSource: Send + Sync {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Direct children of the directory at `path`, sorted by name.
    fn list(&self, path: &str) -> Result<Vec<AssetEntry>, AssetError>;

    /// Full contents of the file at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError>;
}
