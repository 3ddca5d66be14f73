//! Adapters Layer (Driven Adapters)
//!
//! ## Adapters
//!
//! - `DirectoryAssetSource` - Asset bundle stored as a directory tree
//! - `InMemoryAssetSource` - Asset bundle held in memory
//! - `ProvisioningLock` - Exclusive per-dictionary file lock

pub mod directory;
#[cfg(feature = "locking")]
pub mod lock;
pub mod memory;

pub use directory::DirectoryAssetSource;
#[cfg(feature = "locking")]
pub use lock::{LockError, ProvisioningLock};
pub use memory::InMemoryAssetSource;

use crate::error::AssetError;

/// Split a relative asset path into segments, rejecting traversal.
pub(crate) fn asset_segments(path: &str) -> Result<Vec<&str>, AssetError> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(AssetError::InvalidPath(path.to_string())),
            s if s.contains('\\') => return Err(AssetError::InvalidPath(path.to_string())),
            s => segments.push(s),
        }
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_segments() {
        assert_eq!(asset_segments("mil2525c/a/b.dat").unwrap(), vec!["mil2525c", "a", "b.dat"]);
        assert_eq!(asset_segments("/mil2525c//a/").unwrap(), vec!["mil2525c", "a"]);
        assert!(asset_segments("mil2525c/../secret").is_err());
    }
}
