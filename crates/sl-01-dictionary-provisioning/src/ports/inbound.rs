//! Inbound Ports (Driving Ports)
//!
//! The API the host application uses to make a dictionary available.

use shared_types::InstalledDictionary;
use std::path::{Path, PathBuf};

use crate::domain::ProvisioningConfig;
use crate::error::ProvisioningError;

/// Primary provisioning API (Driving Port)
pub trait DictionaryProvisioningApi: Send + Sync {
    /// Ensure `dictionary_name` is installed under `destination_root`.
    ///
    /// If `destination_root/dictionary_name` already exists this is a no-op.
    /// Otherwise every asset under `dictionary_name` is copied there,
    /// preserving relative paths and bytes.
    ///
    /// # Returns
    /// The installed path, which exists on success.
    ///
    /// # Errors
    /// `ProvisioningError::DictionaryUnavailable` when the installed path
    /// does not exist after the copy attempt.
    fn ensure(
        &self,
        dictionary_name: &str,
        destination_root: &Path,
    ) -> Result<PathBuf, ProvisioningError>;

    /// Provision the dictionary described by `config`, honouring its lock
    /// setting, and describe the result for the symbology gate.
    fn ensure_dictionary(
        &self,
        config: &ProvisioningConfig,
    ) -> Result<InstalledDictionary, ProvisioningError>;
}
