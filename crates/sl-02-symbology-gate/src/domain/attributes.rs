//! Typed message attributes
//!
//! Attribute keys come from a fixed set; the symbol code is not an
//! attribute but a required field of every set, since the renderer cannot
//! draw a message without it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::{SymbolCode, TypeError};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Wire name of the symbol code field.
pub const SYMBOL_CODE_FIELD: &str = "sic";

/// Supported message attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKey {
    /// Unit name shown next to the symbol
    UniqueDesignation,
    /// Parent unit
    HigherFormation,
    StaffComments,
    AdditionalInformation,
    /// Equipment count
    Quantity,
    /// Direction of movement in degrees
    Direction,
    Speed,
    /// Date-time group the report is valid for
    #[serde(rename = "datetimevalid")]
    DateTimeGroup,
}

impl AttributeKey {
    pub const ALL: [AttributeKey; 8] = [
        AttributeKey::UniqueDesignation,
        AttributeKey::HigherFormation,
        AttributeKey::StaffComments,
        AttributeKey::AdditionalInformation,
        AttributeKey::Quantity,
        AttributeKey::Direction,
        AttributeKey::Speed,
        AttributeKey::DateTimeGroup,
    ];

    /// Field name the renderer expects.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AttributeKey::UniqueDesignation => "uniquedesignation",
            AttributeKey::HigherFormation => "higherformation",
            AttributeKey::StaffComments => "staffcomments",
            AttributeKey::AdditionalInformation => "additionalinformation",
            AttributeKey::Quantity => "quantity",
            AttributeKey::Direction => "direction",
            AttributeKey::Speed => "speed",
            AttributeKey::DateTimeGroup => "datetimevalid",
        }
    }

    /// Whether `value` has a type this attribute can hold.
    pub fn accepts(&self, value: &AttributeValue) -> bool {
        match self {
            AttributeKey::Quantity => matches!(value, AttributeValue::Integer(_)),
            AttributeKey::Direction | AttributeKey::Speed => {
                matches!(value, AttributeValue::Integer(_) | AttributeValue::Real(_))
            }
            _ => matches!(value, AttributeValue::Text(_)),
        }
    }

    fn check(&self, value: &AttributeValue) -> Result<(), TypeError> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(TypeError::InvalidAttributeValue {
                key: self.wire_name().to_string(),
                reason: format!("unexpected value {}", value),
            })
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for AttributeKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.wire_name() == lower)
            .ok_or_else(|| TypeError::UnknownAttribute(s.to_string()))
    }
}

/// Attribute value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl AttributeValue {
    pub fn to_json(&self) -> Value {
        match self {
            AttributeValue::Integer(i) => Value::from(*i),
            AttributeValue::Real(r) => Value::from(*r),
            AttributeValue::Text(s) => Value::from(s.as_str()),
        }
    }

    /// Convert a JSON scalar. Arrays, objects, booleans and null yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(AttributeValue::Text(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(AttributeValue::Integer)
                .or_else(|| n.as_f64().map(AttributeValue::Real)),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Real(r) => write!(f, "{}", r),
            AttributeValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<f64> for AttributeValue {
    fn from(r: f64) -> Self {
        AttributeValue::Real(r)
    }
}

/// A complete attribute set: a symbol code plus typed attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeSet {
    symbol_code: SymbolCode,
    attributes: BTreeMap<AttributeKey, AttributeValue>,
}

impl AttributeSet {
    pub fn new(symbol_code: SymbolCode) -> Self {
        Self {
            symbol_code,
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute, checking the value type.
    pub fn with(
        mut self,
        key: AttributeKey,
        value: impl Into<AttributeValue>,
    ) -> Result<Self, TypeError> {
        let value = value.into();
        key.check(&value)?;
        self.attributes.insert(key, value);
        Ok(self)
    }

    /// Replace the symbol code, keeping attributes.
    pub fn with_symbol_code(mut self, code: SymbolCode) -> Self {
        self.symbol_code = code;
        self
    }

    pub fn symbol_code(&self) -> SymbolCode {
        self.symbol_code
    }

    pub fn get(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.attributes.get(&key)
    }

    pub fn attributes(&self) -> &BTreeMap<AttributeKey, AttributeValue> {
        &self.attributes
    }

    /// Apply `overrides` on top of this set. Matching keys take the
    /// override's value; an override symbol code replaces this one.
    pub fn merged_with(&self, overrides: &AttributeOverrides) -> AttributeSet {
        let mut attributes = self.attributes.clone();
        attributes.extend(
            overrides
                .attributes
                .iter()
                .map(|(k, v)| (*k, v.clone())),
        );
        AttributeSet {
            symbol_code: overrides.symbol_code.unwrap_or(self.symbol_code),
            attributes,
        }
    }

    pub(crate) fn into_parts(self) -> (SymbolCode, BTreeMap<AttributeKey, AttributeValue>) {
        (self.symbol_code, self.attributes)
    }
}

/// Caller-supplied attributes merged over the gate's defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeOverrides {
    symbol_code: Option<SymbolCode>,
    attributes: BTreeMap<AttributeKey, AttributeValue>,
}

impl AttributeOverrides {
    /// No overrides: the defaults are used as-is.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbol_code(mut self, code: SymbolCode) -> Self {
        self.symbol_code = Some(code);
        self
    }

    pub fn with(
        mut self,
        key: AttributeKey,
        value: impl Into<AttributeValue>,
    ) -> Result<Self, TypeError> {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn insert(
        &mut self,
        key: AttributeKey,
        value: impl Into<AttributeValue>,
    ) -> Result<(), TypeError> {
        let value = value.into();
        key.check(&value)?;
        self.attributes.insert(key, value);
        Ok(())
    }

    pub fn symbol_code(&self) -> Option<SymbolCode> {
        self.symbol_code
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_code.is_none() && self.attributes.is_empty()
    }
}

impl TryFrom<&Map<String, Value>> for AttributeOverrides {
    type Error = TypeError;

    /// Read overrides from wire-named JSON fields (`sic`, `uniquedesignation`, ...).
    fn try_from(fields: &Map<String, Value>) -> Result<Self, Self::Error> {
        let mut overrides = AttributeOverrides::new();
        for (name, value) in fields {
            if name.eq_ignore_ascii_case(SYMBOL_CODE_FIELD) {
                let code = value.as_str().ok_or_else(|| TypeError::InvalidSymbolCode {
                    code: value.to_string(),
                    reason: "symbol code must be a string".to_string(),
                })?;
                overrides.symbol_code = Some(SymbolCode::parse(code)?);
                continue;
            }

            let key: AttributeKey = name.parse()?;
            let value = AttributeValue::from_json(value).ok_or_else(|| {
                TypeError::InvalidAttributeValue {
                    key: key.wire_name().to_string(),
                    reason: format!("unsupported JSON value {}", value),
                }
            })?;
            overrides.insert(key, value)?;
        }
        Ok(overrides)
    }
}
