//! Asset bundle held in memory.
//!
//! Used by tests and by hosts that embed dictionary assets in the binary.

use std::collections::BTreeMap;

use super::asset_segments;
use crate::error::AssetError;
use crate::ports::{AssetEntry, AssetKind, AssetSource};

/// In-memory asset bundle keyed by normalized file path.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAssetSource {
    files: BTreeMap<String, Vec<u8>>,
}

impl InMemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. Intermediate directories are implied.
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        self.files.insert(normalize(path), contents.into());
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}

impl AssetSource for InMemoryAssetSource {
    fn exists(&self, path: &str) -> bool {
        let Ok(segments) = asset_segments(path) else {
            return false;
        };
        let key = segments.join("/");
        if key.is_empty() {
            return !self.files.is_empty();
        }
        let prefix = format!("{}/", key);
        self.files.contains_key(&key) || self.files.keys().any(|k| k.starts_with(&prefix))
    }

    fn list(&self, path: &str) -> Result<Vec<AssetEntry>, AssetError> {
        let key = asset_segments(path)?.join("/");
        let prefix = if key.is_empty() {
            String::new()
        } else {
            format!("{}/", key)
        };

        let mut children: BTreeMap<&str, AssetKind> = BTreeMap::new();
        for file in self.files.keys() {
            let Some(rest) = file.strip_prefix(prefix.as_str()) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    children.insert(dir, AssetKind::Directory);
                }
                None => {
                    children.entry(rest).or_insert(AssetKind::File);
                }
            }
        }

        if children.is_empty() {
            return Err(AssetError::NotFound(path.to_string()));
        }

        Ok(children
            .into_iter()
            .map(|(name, kind)| AssetEntry {
                name: name.to_string(),
                kind,
            })
            .collect())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let key = asset_segments(path)?.join("/");
        self.files
            .get(&key)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}
