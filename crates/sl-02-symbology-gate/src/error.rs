//! Error types for the Symbology Gate subsystem

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::MessageId;
use crate::ports::RejectReason;

/// Errors returned by the gate API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// The dictionary handed to `bind` is not installed.
    #[error("Dictionary unavailable at {}: {reason}", path.display())]
    DictionaryUnavailable { path: PathBuf, reason: String },

    /// The layer stack could not build a message layer for the dictionary.
    #[error("Rendering layer init failed for {}: {reason}", path.display())]
    RenderingLayerInitFailed { path: PathBuf, reason: String },

    #[error("Gate is not bound to a dictionary")]
    GateNotBound,

    /// The layer refused one message. The gate remains bound.
    #[error("Message {message_id} rejected: {reason}")]
    MessageRejected {
        message_id: MessageId,
        reason: RejectReason,
    },

    #[error("Gate is already bound")]
    AlreadyBound,

    #[error("Gate is closed")]
    Closed,

    #[error("Message geometry has no points")]
    EmptyGeometry,
}

impl GateError {
    /// Errors raised while binding, after which the host should run
    /// without the symbology layer.
    pub fn is_bind_failure(&self) -> bool {
        matches!(
            self,
            GateError::DictionaryUnavailable { .. } | GateError::RenderingLayerInitFailed { .. }
        )
    }
}
