//! # Runtime Configuration
//!
//! Everything the shell needs to provision a dictionary and bind a gate,
//! read from `SL_*` environment variables. Invalid values are logged and
//! the default is kept.

use shared_types::{DictionaryType, SpatialReference, SymbolCode};
use sl_01_dictionary_provisioning::ProvisioningConfig;
use sl_02_symbology_gate::{GateConfig, DEFAULT_POSITION_REPORT_CODE};
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Dictionary provisioning settings.
    pub provisioning: ProvisioningConfig,
    /// Symbol code for reports that carry none.
    pub default_symbol_code: SymbolCode,
    /// Spatial reference of incoming coordinates.
    pub spatial_reference: SpatialReference,
    /// File receiving JSON-lines messages; stdout when `None`.
    pub message_out: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            provisioning: ProvisioningConfig::default(),
            default_symbol_code: DEFAULT_POSITION_REPORT_CODE,
            spatial_reference: SpatialReference::WGS84,
            message_out: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `SL_DICTIONARY_NAME`: Dictionary to provision (default: mil2525c)
    /// - `SL_DICTIONARY_TYPE`: `mil2525c` or `app6b` (default: mil2525c)
    /// - `SL_ASSET_ROOT`: Read-only asset bundle (default: ./assets)
    /// - `SL_DICTIONARY_ROOT`: Writable install root (default: ./data/dicts)
    /// - `SL_PROVISION_LOCK`: Lock while provisioning (default: false)
    /// - `SL_DEFAULT_SIC`: Default symbol code (default: SFGPEVAC-------)
    /// - `SL_WKID`: Spatial reference of input coordinates (default: 4326)
    /// - `SL_MESSAGE_OUT`: JSON-lines output file (default: stdout)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = lookup("SL_DICTIONARY_NAME") {
            config.provisioning.dictionary_name = name;
        }
        if let Some(value) = lookup("SL_DICTIONARY_TYPE") {
            match value.parse::<DictionaryType>() {
                Ok(t) => config.provisioning.dictionary_type = t,
                Err(e) => warn!(value = %value, error = %e, "Ignoring SL_DICTIONARY_TYPE"),
            }
        }
        if let Some(root) = lookup("SL_ASSET_ROOT") {
            config.provisioning.asset_root = PathBuf::from(root);
        }
        if let Some(root) = lookup("SL_DICTIONARY_ROOT") {
            config.provisioning.destination_root = PathBuf::from(root);
        }
        if let Some(value) = lookup("SL_PROVISION_LOCK") {
            config.provisioning.use_lock = value.eq_ignore_ascii_case("true") || value == "1";
        }
        if let Some(value) = lookup("SL_DEFAULT_SIC") {
            match SymbolCode::parse(&value) {
                Ok(code) => config.default_symbol_code = code,
                Err(e) => warn!(value = %value, error = %e, "Ignoring SL_DEFAULT_SIC"),
            }
        }
        if let Some(value) = lookup("SL_WKID") {
            match value.trim().parse::<u32>() {
                Ok(wkid) => config.spatial_reference = SpatialReference(wkid),
                Err(e) => warn!(value = %value, error = %e, "Ignoring SL_WKID"),
            }
        }
        config.message_out = lookup("SL_MESSAGE_OUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        config
    }

    /// Gate configuration derived from this runtime configuration.
    pub fn gate_config(&self) -> GateConfig {
        GateConfig::default()
            .with_default_symbol_code(self.default_symbol_code)
            .with_spatial_reference(self.spatial_reference)
    }
}
