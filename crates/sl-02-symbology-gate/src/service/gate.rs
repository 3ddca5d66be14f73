//! Symbology Message Gate
//!
//! Owns the binding between one installed dictionary and one message layer,
//! and turns domain events into messages for that layer.

use shared_types::{GeoPoint, InstalledDictionary};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{
    AttributeOverrides, EventKind, GateConfig, GateState, MessageId, SymbologyMessage,
};
use crate::error::GateError;
use crate::metrics::GateMetrics;
use crate::ports::{LayerId, LayerStack, MessageLayer, SymbologyGateApi};

/// The live binding of a gate: its message layer and the dictionary the
/// layer was created from. Owned by the gate; dropped on teardown.
pub struct RenderingLayerHandle {
    layer: Box<dyn MessageLayer>,
    dictionary: InstalledDictionary,
}

impl RenderingLayerHandle {
    pub fn layer_id(&self) -> LayerId {
        self.layer.id()
    }

    pub fn dictionary(&self) -> &InstalledDictionary {
        &self.dictionary
    }
}

impl fmt::Debug for RenderingLayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderingLayerHandle")
            .field("layer", &self.layer.id())
            .field("dictionary", &self.dictionary)
            .finish()
    }
}

/// Symbology gate implementation
///
/// Implements `SymbologyGateApi` over an injected layer stack. All
/// operations take `&mut self`; a gate is driven by one owner.
pub struct SymbologyMessageGate<S: LayerStack> {
    stack: Arc<S>,
    config: GateConfig,
    state: GateState,
    /// Present exactly while `state` is `Bound`
    handle: Option<RenderingLayerHandle>,
    metrics: Arc<GateMetrics>,
}

impl<S: LayerStack> SymbologyMessageGate<S> {
    pub fn new(stack: Arc<S>, config: GateConfig) -> Self {
        Self {
            stack,
            config,
            state: GateState::Unbound,
            handle: None,
            metrics: Arc::new(GateMetrics::new()),
        }
    }

    /// Share an existing metrics collector
    pub fn with_metrics(mut self, metrics: Arc<GateMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn is_bound(&self) -> bool {
        self.state == GateState::Bound
    }

    /// Dictionary the gate is bound to.
    pub fn dictionary(&self) -> Option<&InstalledDictionary> {
        self.handle.as_ref().map(RenderingLayerHandle::dictionary)
    }

    pub fn handle(&self) -> Option<&RenderingLayerHandle> {
        self.handle.as_ref()
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn metrics(&self) -> &GateMetrics {
        &self.metrics
    }

    fn build_message(
        &self,
        event: EventKind,
        points: Vec<GeoPoint>,
        overrides: &AttributeOverrides,
    ) -> SymbologyMessage {
        SymbologyMessage::new(
            MessageId::mint(),
            event.message_type(),
            points,
            self.config.spatial_reference,
            self.config.default_attributes.merged_with(overrides),
        )
    }
}

impl<S: LayerStack> SymbologyGateApi for SymbologyMessageGate<S> {
    fn bind(
        &mut self,
        dictionary: InstalledDictionary,
    ) -> Result<&RenderingLayerHandle, GateError> {
        match self.state {
            GateState::Unbound => {}
            GateState::Bound => return Err(GateError::AlreadyBound),
            GateState::Closed => return Err(GateError::Closed),
        }

        let path = dictionary.path();
        if !path.is_dir() {
            warn!(dictionary = dictionary.name(), path = %path.display(), "Dictionary not installed");
            return Err(GateError::DictionaryUnavailable {
                path: path.to_path_buf(),
                reason: if path.exists() {
                    "not a directory".to_string()
                } else {
                    "path does not exist".to_string()
                },
            });
        }

        let layer = self.stack.add_message_layer(&dictionary).map_err(|e| {
            warn!(dictionary = dictionary.name(), error = %e, "Message layer creation failed");
            GateError::RenderingLayerInitFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        info!(
            dictionary = dictionary.name(),
            dictionary_type = %dictionary.dictionary_type(),
            layer = %layer.id(),
            "Symbology layer bound"
        );

        self.state = GateState::Bound;
        Ok(self.handle.insert(RenderingLayerHandle { layer, dictionary }))
    }

    fn submit(
        &mut self,
        event: EventKind,
        location: GeoPoint,
        overrides: &AttributeOverrides,
    ) -> Result<MessageId, GateError> {
        self.submit_geometry(event, vec![location], overrides)
    }

    fn submit_geometry(
        &mut self,
        event: EventKind,
        points: Vec<GeoPoint>,
        overrides: &AttributeOverrides,
    ) -> Result<MessageId, GateError> {
        let Some(handle) = self.handle.as_ref() else {
            self.metrics.record_not_bound();
            debug!(state = %self.state, "Event dropped, gate not bound");
            return Err(GateError::GateNotBound);
        };
        if points.is_empty() {
            return Err(GateError::EmptyGeometry);
        }

        let message = self.build_message(event, points, overrides);
        let message_id = message.id();
        self.metrics.record_submitted();

        match handle.layer.process_message(&message) {
            Ok(()) => {
                self.metrics.record_accepted();
                debug!(
                    message_id = %message_id,
                    message_type = message.message_type().as_str(),
                    sic = %message.symbol_code(),
                    points = %message.control_points(),
                    "Message processed"
                );
                Ok(message_id)
            }
            Err(reason) => {
                self.metrics.record_rejected();
                warn!(message_id = %message_id, reason = %reason, "Message rejected by layer");
                Err(GateError::MessageRejected { message_id, reason })
            }
        }
    }

    fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            let layer_id = handle.layer_id();
            if self.stack.remove_layer(layer_id) {
                info!(layer = %layer_id, dictionary = handle.dictionary().name(), "Symbology layer removed");
            } else {
                warn!(layer = %layer_id, "Symbology layer was already gone from the stack");
            }
        }
        self.state = GateState::Closed;
    }

    fn state(&self) -> GateState {
        self.state
    }
}

impl<S: LayerStack> Drop for SymbologyMessageGate<S> {
    fn drop(&mut self) {
        if self.state != GateState::Closed {
            self.close();
        }
    }
}
