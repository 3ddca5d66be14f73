//! # Outbound Ports (Driven Ports)
//!
//! The rendering side the gate drives. The map engine owns the real
//! implementations; this crate ships an in-memory stack and a JSON-lines
//! stack.

use shared_types::{DictionaryType, InstalledDictionary, SymbolCode};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{AttributeKey, SymbologyMessage};

/// Identifier of a layer within its stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// Why a layer could not be created
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerError {
    /// The dictionary at `path` cannot back a message layer.
    #[error("Unsupported dictionary at {}: {reason}", path.display())]
    UnsupportedDictionary { path: PathBuf, reason: String },

    #[error("Layer backend error: {0}")]
    Backend(String),
}

/// Why a layer refused one message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// No dictionary entry for the symbol code.
    #[error("Symbol code {code} is not defined by {dictionary_type}")]
    UnknownSymbolCode {
        code: SymbolCode,
        dictionary_type: DictionaryType,
    },

    /// Geometry unusable for the message's spatial reference.
    #[error("Malformed geometry {points:?}: {reason}")]
    MalformedGeometry { points: String, reason: String },

    #[error("Invalid attribute {key}={value}: {reason}")]
    InvalidAttribute {
        key: AttributeKey,
        value: String,
        reason: String,
    },

    #[error("Layer backend error: {0}")]
    Backend(String),
}

/// A message layer bound to one dictionary.
pub trait MessageLayer: Send + Sync {
    /// Identifier under which the layer is registered.
    fn id(&self) -> LayerId;

    /// Process a message synchronously.
    fn process_message(&self, message: &SymbologyMessage) -> Result<(), RejectReason>;
}

/// The map's ordered layer stack.
pub trait LayerStack: Send + Sync {
    /// Create a message layer for `dictionary` and register it on top of
    /// the stack.
    fn add_message_layer(
        &self,
        dictionary: &InstalledDictionary,
    ) -> Result<Box<dyn MessageLayer>, LayerError>;

    /// Remove a layer. Returns `false` if the id is not registered.
    fn remove_layer(&self, id: LayerId) -> bool;
}
