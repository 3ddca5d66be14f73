//! # Core Domain Entities
//!
//! Defines the value types shared across the symbology pipeline.
//!
//! ## Clusters
//!
//! - **Geometry**: `GeoPoint`, `SpatialReference`
//! - **Dictionaries**: `DictionaryType`, `InstalledDictionary`
//! - **Symbology**: `SymbolCode`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::TypeError;

// =============================================================================
// CLUSTER A: GEOMETRY
// =============================================================================

/// Well-known ID (EPSG code) of a spatial reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpatialReference(pub u32);

impl SpatialReference {
    /// WGS84 geographic coordinates (longitude, latitude).
    pub const WGS84: Self = Self(4326);
    /// Web Mercator projected coordinates.
    pub const WEB_MERCATOR: Self = Self(3857);

    /// The numeric WKID.
    pub fn wkid(&self) -> u32 {
        self.0
    }

    /// Whether coordinates are geographic degrees.
    pub fn is_geographic(&self) -> bool {
        *self == Self::WGS84
    }
}

impl Default for SpatialReference {
    fn default() -> Self {
        Self::WGS84
    }
}

/// A single map coordinate. `x` is easting/longitude, `y` northing/latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both ordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Whether the point lies inside longitude/latitude bounds.
    pub fn within_geographic_bounds(&self) -> bool {
        (-180.0..=180.0).contains(&self.x) && (-90.0..=90.0).contains(&self.y)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

// =============================================================================
// CLUSTER B: DICTIONARIES
// =============================================================================

/// The symbology standard a dictionary implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryType {
    /// MIL-STD-2525C
    #[default]
    Mil2525C,
    /// NATO APP-6(B)
    App6B,
}

impl DictionaryType {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DictionaryType::Mil2525C => "mil2525c",
            DictionaryType::App6B => "app6b",
        }
    }

    /// Coding schemes (first SIDC character) the standard defines.
    pub fn coding_schemes(&self) -> &'static [char] {
        match self {
            DictionaryType::Mil2525C => &['S', 'G', 'W', 'I', 'O', 'E'],
            DictionaryType::App6B => &['S', 'G', 'W', 'I'],
        }
    }

    /// Whether `code` belongs to a coding scheme of this standard.
    pub fn supports(&self, code: &SymbolCode) -> bool {
        self.coding_schemes().contains(&code.coding_scheme())
    }
}

impl fmt::Display for DictionaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DictionaryType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "mil2525c" | "2525c" | "milstd2525c" => Ok(DictionaryType::Mil2525C),
            "app6b" => Ok(DictionaryType::App6B),
            _ => Err(TypeError::UnknownDictionaryType(s.to_string())),
        }
    }
}

/// A dictionary whose files are present at a writable, stable location.
///
/// Produced by the provisioning subsystem and consumed by the symbology gate
/// at bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledDictionary {
    name: String,
    dictionary_type: DictionaryType,
    path: PathBuf,
}

impl InstalledDictionary {
    pub fn new(
        name: impl Into<String>,
        dictionary_type: DictionaryType,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            dictionary_type,
            path: path.into(),
        }
    }

    /// Dictionary name (asset and destination subfolder).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dictionary_type(&self) -> DictionaryType {
        self.dictionary_type
    }

    /// Installed directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// =============================================================================
// CLUSTER C: SYMBOLOGY
// =============================================================================

/// Length of a symbol identification code.
pub const SYMBOL_CODE_LEN: usize = 15;

const fn is_symbol_code_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-' || b == b'*'
}

/// A 15-character symbol identification code (SIDC) selecting the
/// dictionary entry that renders a message.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolCode([u8; SYMBOL_CODE_LEN]);

impl SymbolCode {
    /// Build a code from a literal, for constants.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if any byte is not
    /// an upper-case letter, digit, `-` or `*`.
    pub const fn from_ascii(bytes: [u8; SYMBOL_CODE_LEN]) -> Self {
        let mut i = 0;
        while i < SYMBOL_CODE_LEN {
            assert!(is_symbol_code_byte(bytes[i]), "invalid symbol code byte");
            i += 1;
        }
        Self(bytes)
    }

    /// Parse and validate a code. Lower-case letters are upper-cased.
    pub fn parse(code: &str) -> Result<Self, TypeError> {
        let trimmed = code.trim();
        let invalid = |reason: String| TypeError::InvalidSymbolCode {
            code: code.to_string(),
            reason,
        };

        if trimmed.len() != SYMBOL_CODE_LEN {
            return Err(invalid(format!(
                "expected {} characters, got {}",
                SYMBOL_CODE_LEN,
                trimmed.chars().count()
            )));
        }

        let mut bytes = [0u8; SYMBOL_CODE_LEN];
        for (i, b) in trimmed.bytes().enumerate() {
            let upper = b.to_ascii_uppercase();
            if !is_symbol_code_byte(upper) {
                return Err(invalid(format!("illegal character at position {}", i)));
            }
            bytes[i] = upper;
        }
        Ok(Self(bytes))
    }

    pub fn as_str(&self) -> &str {
        // Bytes are validated ASCII.
        std::str::from_utf8(&self.0).unwrap_or("")
    }

    /// First character: the coding scheme (e.g. `S` for warfighting).
    pub fn coding_scheme(&self) -> char {
        self.0[0] as char
    }

    /// Second character: the standard identity (e.g. `F` for friend).
    pub fn affiliation(&self) -> char {
        self.0[1] as char
    }
}

impl fmt::Debug for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolCode({})", self.as_str())
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolCode {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SymbolCode {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SymbolCode> for String {
    fn from(code: SymbolCode) -> Self {
        code.as_str().to_string()
    }
}
