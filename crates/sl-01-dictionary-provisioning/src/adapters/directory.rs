//! Asset bundle backed by a directory on disk.

use std::fs;
use std::path::{Path, PathBuf};

use super::asset_segments;
use crate::error::AssetError;
use crate::ports::{AssetEntry, AssetKind, AssetSource};

/// Serves assets from a directory tree. Never writes to it.
#[derive(Clone, Debug)]
pub struct DirectoryAssetSource {
    root: PathBuf,
}

impl DirectoryAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, AssetError> {
        let mut resolved = self.root.clone();
        for segment in asset_segments(path)? {
            resolved.push(segment);
        }
        Ok(resolved)
    }
}

impl AssetSource for DirectoryAssetSource {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.exists()).unwrap_or(false)
    }

    fn list(&self, path: &str) -> Result<Vec<AssetEntry>, AssetError> {
        let dir = self.resolve(path)?;
        if !dir.is_dir() {
            return Err(AssetError::NotFound(path.to_string()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| AssetError::io(path, &e))? {
            let entry = entry.map_err(|e| AssetError::io(path, &e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks, so a linked folder is walked like a real one
            let metadata = fs::metadata(entry.path())
                .map_err(|e| AssetError::io(format!("{}/{}", path, name), &e))?;
            let kind = if metadata.is_dir() {
                AssetKind::Directory
            } else {
                AssetKind::File
            };
            entries.push(AssetEntry { name, kind });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let file = self.resolve(path)?;
        if !file.is_file() {
            return Err(AssetError::NotFound(path.to_string()));
        }
        fs::read(&file).map_err(|e| AssetError::io(path, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bundle() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("mil2525c/symbols")).unwrap();
        fs::write(dir.path().join("mil2525c/dictionary.dat"), b"dict").unwrap();
        fs::write(dir.path().join("mil2525c/symbols/sfgp.svg"), b"<svg/>").unwrap();
        dir
    }

    #[test]
    fn test_list_sorted_with_kinds() {
        let dir = bundle();
        let source = DirectoryAssetSource::new(dir.path());

        let entries = source.list("mil2525c").unwrap();
        assert_eq!(
            entries,
            vec![AssetEntry::file("dictionary.dat"), AssetEntry::directory("symbols")]
        );
    }

    #[test]
    fn test_read_file() {
        let dir = bundle();
        let source = DirectoryAssetSource::new(dir.path());
        assert_eq!(source.read("mil2525c/symbols/sfgp.svg").unwrap(), b"<svg/>");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_folder_is_listed_as_directory() {
        let dir = TempDir::new().unwrap();
        let linked = dir.path().join("shared-symbols");
        fs::create_dir_all(&linked).unwrap();
        fs::write(linked.join("sfgp.svg"), b"<svg/>").unwrap();
        fs::create_dir_all(dir.path().join("mil2525c")).unwrap();
        fs::write(dir.path().join("mil2525c/top.dat"), b"top").unwrap();
        std::os::unix::fs::symlink(&linked, dir.path().join("mil2525c/symbols")).unwrap();

        let source = DirectoryAssetSource::new(dir.path());

        assert_eq!(
            source.list("mil2525c").unwrap(),
            vec![AssetEntry::directory("symbols"), AssetEntry::file("top.dat")]
        );
        assert_eq!(source.read("mil2525c/symbols/sfgp.svg").unwrap(), b"<svg/>");
    }

    #[test]
    fn test_missing_folder() {
        let dir = bundle();
        let source = DirectoryAssetSource::new(dir.path());
        assert!(!source.exists("app6b"));
        assert!(matches!(source.list("app6b"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_rejects_traversal() {
        let dir = bundle();
        let source = DirectoryAssetSource::new(dir.path().join("mil2525c"));
        assert!(!source.exists("../mil2525c"));
        assert!(matches!(source.read("../x"), Err(AssetError::InvalidPath(_))));
    }
}
