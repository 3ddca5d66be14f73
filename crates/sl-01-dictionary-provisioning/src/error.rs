//! Error types for the Dictionary Provisioning subsystem

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the provisioning API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisioningError {
    /// The dictionary could not be made available at its installed path.
    ///
    /// Source read failures, destination write failures and missing or
    /// empty asset bundles all surface as this variant; the caller's only
    /// remedy is to run without advanced symbology.
    #[error("Dictionary {name:?} unavailable at {}: {reason}", path.display())]
    DictionaryUnavailable {
        name: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Invalid provisioning configuration: {0}")]
    InvalidConfig(String),
}

/// Errors from asset sources
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid asset path: {0}")]
    InvalidPath(String),

    #[error("Asset I/O error at {path}: {message}")]
    Io { path: String, message: String },
}

impl AssetError {
    pub(crate) fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        AssetError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
