//! Inbound Ports (Driving Ports)
//!
//! The API the host application uses to bind a dictionary and feed events.

use shared_types::{GeoPoint, InstalledDictionary};

use crate::domain::{AttributeOverrides, EventKind, GateState, MessageId};
use crate::error::GateError;
use crate::service::RenderingLayerHandle;

/// Primary symbology API (Driving Port)
pub trait SymbologyGateApi {
    /// Bind the gate to an installed dictionary.
    ///
    /// Creates a message layer for the dictionary and registers it on top
    /// of the layer stack. Only legal once, from `Unbound`.
    ///
    /// # Errors
    /// - `DictionaryUnavailable` if the dictionary directory is missing
    /// - `RenderingLayerInitFailed` if the stack refuses the dictionary
    /// - `AlreadyBound` / `Closed` outside the `Unbound` state
    fn bind(&mut self, dictionary: InstalledDictionary)
        -> Result<&RenderingLayerHandle, GateError>;

    /// Turn a domain event at `location` into a message and hand it to the
    /// layer before returning.
    ///
    /// `overrides` are merged over the configured default attributes.
    ///
    /// # Errors
    /// - `GateNotBound` before `bind` or after `close`; nothing is forwarded
    /// - `MessageRejected` if the layer refuses the message; the gate stays bound
    fn submit(
        &mut self,
        event: EventKind,
        location: GeoPoint,
        overrides: &AttributeOverrides,
    ) -> Result<MessageId, GateError>;

    /// Same as [`submit`](Self::submit) for a multi-point geometry.
    ///
    /// # Errors
    /// `EmptyGeometry` if `points` is empty, plus the errors of `submit`.
    fn submit_geometry(
        &mut self,
        event: EventKind,
        points: Vec<GeoPoint>,
        overrides: &AttributeOverrides,
    ) -> Result<MessageId, GateError>;

    /// Release the layer and move to `Closed`. Idempotent.
    fn close(&mut self);

    /// Current lifecycle state.
    fn state(&self) -> GateState;
}
