//! Symbology messages
//!
//! A message is the unit of work handed to the rendering layer: one
//! identity, one action, a geometry, a symbol code and attributes. Messages
//! are only ever built by the gate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::{GeoPoint, SpatialReference, SymbolCode};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use super::attributes::{AttributeKey, AttributeSet, AttributeValue, SYMBOL_CODE_FIELD};

/// Identity of a message. Minted by the gate, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Fresh random (v4) identity.
    pub(crate) fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0)
    }
}

/// Controlled vocabulary of message types the renderer understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    PositionReport,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::PositionReport => "position_report",
        }
    }
}

/// What the renderer should do with the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageAction {
    /// Create the graphic, or move it if the id is already drawn
    #[default]
    Update,
}

impl MessageAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageAction::Update => "update",
        }
    }
}

/// A single message for the rendering layer.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbologyMessage {
    id: MessageId,
    message_type: MessageType,
    action: MessageAction,
    geometry: Vec<GeoPoint>,
    spatial_reference: SpatialReference,
    symbol_code: SymbolCode,
    attributes: BTreeMap<AttributeKey, AttributeValue>,
}

impl SymbologyMessage {
    /// Callers guarantee `geometry` is non-empty.
    pub(crate) fn new(
        id: MessageId,
        message_type: MessageType,
        geometry: Vec<GeoPoint>,
        spatial_reference: SpatialReference,
        attributes: AttributeSet,
    ) -> Self {
        let (symbol_code, attributes) = attributes.into_parts();
        Self {
            id,
            message_type,
            action: MessageAction::Update,
            geometry,
            spatial_reference,
            symbol_code,
            attributes,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn action(&self) -> MessageAction {
        self.action
    }

    pub fn geometry(&self) -> &[GeoPoint] {
        &self.geometry
    }

    pub fn spatial_reference(&self) -> SpatialReference {
        self.spatial_reference
    }

    pub fn symbol_code(&self) -> SymbolCode {
        self.symbol_code
    }

    pub fn attribute(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.attributes.get(&key)
    }

    pub fn attributes(&self) -> &BTreeMap<AttributeKey, AttributeValue> {
        &self.attributes
    }

    /// Geometry as `x,y` pairs separated by `;`.
    pub fn control_points(&self) -> String {
        self.geometry
            .iter()
            .map(GeoPoint::to_string)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Flat field map in the renderer's wire shape.
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("_id".into(), Value::from(self.id.to_string()));
        fields.insert("_type".into(), Value::from(self.message_type.as_str()));
        fields.insert("_action".into(), Value::from(self.action.as_str()));
        fields.insert("_wkid".into(), Value::from(self.spatial_reference.wkid()));
        fields.insert("_control_points".into(), Value::from(self.control_points()));
        fields.insert(SYMBOL_CODE_FIELD.into(), Value::from(self.symbol_code.as_str()));
        for (key, value) in &self.attributes {
            fields.insert(key.wire_name().into(), value.to_json());
        }
        fields
    }
}
