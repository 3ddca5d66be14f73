//! Gate configuration

use shared_types::{SpatialReference, SymbolCode};

use super::attributes::AttributeSet;

/// Symbol code used for position reports when the caller supplies none
/// (friendly ground equipment, evacuation vehicle).
pub const DEFAULT_POSITION_REPORT_CODE: SymbolCode = SymbolCode::from_ascii(*b"SFGPEVAC-------");

/// Configuration for a symbology gate
#[derive(Clone, Debug, PartialEq)]
pub struct GateConfig {
    /// Attributes every message starts from before overrides apply
    pub default_attributes: AttributeSet,
    /// Spatial reference stamped on every message
    pub spatial_reference: SpatialReference,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            default_attributes: AttributeSet::new(DEFAULT_POSITION_REPORT_CODE),
            spatial_reference: SpatialReference::WGS84,
        }
    }
}

impl GateConfig {
    pub fn with_default_attributes(mut self, attributes: AttributeSet) -> Self {
        self.default_attributes = attributes;
        self
    }

    /// Replace only the default symbol code, keeping default attributes.
    pub fn with_default_symbol_code(mut self, code: SymbolCode) -> Self {
        self.default_attributes = self.default_attributes.with_symbol_code(code);
        self
    }

    pub fn with_spatial_reference(mut self, spatial_reference: SpatialReference) -> Self {
        self.spatial_reference = spatial_reference;
        self
    }
}
