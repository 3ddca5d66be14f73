//! Provisioning configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use sl_01_dictionary_provisioning::ProvisioningConfig;
//!
//! let config = ProvisioningConfig::default()
//!     .with_dictionary_name("mil2525c")
//!     .with_destination_root("/data/dicts")
//!     .with_lock(true);
//! config.validate()?;
//! ```

use serde::{Deserialize, Serialize};
use shared_types::DictionaryType;
use std::path::PathBuf;

use crate::domain::layout::DictionaryLayout;
use crate::error::ProvisioningError;

/// Dictionary provisioning configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    /// Asset subfolder and destination subfolder name
    pub dictionary_name: String,
    /// Standard implemented by the dictionary
    pub dictionary_type: DictionaryType,
    /// Root of the read-only asset bundle on disk
    pub asset_root: PathBuf,
    /// Writable directory that receives installed dictionaries
    pub destination_root: PathBuf,
    /// Hold an exclusive file lock while provisioning
    pub use_lock: bool,
    /// Seconds to wait for the lock
    pub lock_timeout_secs: u64,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            dictionary_name: "mil2525c".to_string(),
            dictionary_type: DictionaryType::Mil2525C,
            asset_root: PathBuf::from("./assets"),
            destination_root: PathBuf::from("./data/dicts"),
            use_lock: false,
            lock_timeout_secs: 30,
        }
    }
}

impl ProvisioningConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ProvisioningError> {
        DictionaryLayout::validate_name(&self.dictionary_name)
            .map_err(ProvisioningError::InvalidConfig)?;

        if self.destination_root.as_os_str().is_empty() {
            return Err(ProvisioningError::InvalidConfig(
                "destination_root cannot be empty".to_string(),
            ));
        }

        if self.use_lock && self.lock_timeout_secs == 0 {
            return Err(ProvisioningError::InvalidConfig(
                "lock_timeout_secs must be positive when locking is enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// Where the dictionary ends up once provisioned.
    pub fn installed_path(&self) -> PathBuf {
        self.destination_root.join(&self.dictionary_name)
    }

    pub fn with_dictionary_name(mut self, name: impl Into<String>) -> Self {
        self.dictionary_name = name.into();
        self
    }

    pub fn with_dictionary_type(mut self, dictionary_type: DictionaryType) -> Self {
        self.dictionary_type = dictionary_type;
        self
    }

    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    pub fn with_destination_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.destination_root = root.into();
        self
    }

    pub fn with_lock(mut self, use_lock: bool) -> Self {
        self.use_lock = use_lock;
        self
    }
}
