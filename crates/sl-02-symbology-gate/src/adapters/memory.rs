//! In-memory layer stack
//!
//! An ordered stack of layers living in process memory. Message layers
//! record every message they accept so hosts and tests can inspect what
//! reached the renderer.

use parking_lot::Mutex;
use shared_types::{DictionaryType, InstalledDictionary};
use std::sync::Arc;
use tracing::debug;

use super::{check_dictionary, check_message};
use crate::domain::SymbologyMessage;
use crate::ports::{LayerError, LayerId, LayerStack, MessageLayer, RejectReason};

#[derive(Debug)]
struct LayerRecord {
    id: LayerId,
    dictionary: InstalledDictionary,
    messages: Vec<SymbologyMessage>,
}

#[derive(Debug, Default)]
struct StackState {
    next_id: u64,
    /// Bottom to top
    layers: Vec<LayerRecord>,
    /// Removed layers, kept for inspection
    retired: Vec<LayerRecord>,
}

impl StackState {
    fn find(&self, id: LayerId) -> Option<&LayerRecord> {
        self.layers
            .iter()
            .chain(self.retired.iter())
            .find(|l| l.id == id)
    }
}

/// In-memory implementation of `LayerStack`
#[derive(Debug, Clone, Default)]
pub struct InMemoryLayerStack {
    state: Arc<Mutex<StackState>>,
}

impl InMemoryLayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered layers, bottom to top.
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.state.lock().layers.iter().map(|l| l.id).collect()
    }

    pub fn layer_count(&self) -> usize {
        self.state.lock().layers.len()
    }

    /// Topmost layer, if any.
    pub fn top_layer(&self) -> Option<LayerId> {
        self.state.lock().layers.last().map(|l| l.id)
    }

    /// Dictionary a layer was created for. Removed layers are included.
    pub fn dictionary(&self, id: LayerId) -> Option<InstalledDictionary> {
        self.state.lock().find(id).map(|l| l.dictionary.clone())
    }

    /// Messages accepted by a layer, in arrival order. Removed layers keep
    /// the messages they accepted.
    pub fn messages(&self, id: LayerId) -> Vec<SymbologyMessage> {
        self.state
            .lock()
            .find(id)
            .map(|l| l.messages.clone())
            .unwrap_or_default()
    }

    /// Messages accepted by every layer this stack has created.
    pub fn total_messages(&self) -> usize {
        let state = self.state.lock();
        state
            .layers
            .iter()
            .chain(state.retired.iter())
            .map(|l| l.messages.len())
            .sum()
    }
}

impl LayerStack for InMemoryLayerStack {
    fn add_message_layer(
        &self,
        dictionary: &InstalledDictionary,
    ) -> Result<Box<dyn MessageLayer>, LayerError> {
        check_dictionary(dictionary)?;

        let mut state = self.state.lock();
        state.next_id += 1;
        let id = LayerId(state.next_id);
        state.layers.push(LayerRecord {
            id,
            dictionary: dictionary.clone(),
            messages: Vec::new(),
        });

        debug!(layer = %id, dictionary = %dictionary.path().display(), "Message layer added");
        Ok(Box::new(InMemoryMessageLayer {
            id,
            dictionary_type: dictionary.dictionary_type(),
            state: Arc::clone(&self.state),
        }))
    }

    fn remove_layer(&self, id: LayerId) -> bool {
        let mut state = self.state.lock();
        match state.layers.iter().position(|l| l.id == id) {
            Some(index) => {
                let record = state.layers.remove(index);
                state.retired.push(record);
                debug!(layer = %id, "Message layer removed");
                true
            }
            None => false,
        }
    }
}

struct InMemoryMessageLayer {
    id: LayerId,
    dictionary_type: DictionaryType,
    state: Arc<Mutex<StackState>>,
}

impl MessageLayer for InMemoryMessageLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn process_message(&self, message: &SymbologyMessage) -> Result<(), RejectReason> {
        check_message(self.dictionary_type, message)?;

        let mut state = self.state.lock();
        let record = state
            .layers
            .iter_mut()
            .find(|l| l.id == self.id)
            .ok_or_else(|| RejectReason::Backend(format!("{} is no longer in the stack", self.id)))?;
        record.messages.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttributeSet, MessageId, MessageType, DEFAULT_POSITION_REPORT_CODE};
    use shared_types::{GeoPoint, SpatialReference, SymbolCode};
    use std::fs;
    use tempfile::TempDir;

    fn installed(dir: &TempDir, dictionary_type: DictionaryType) -> InstalledDictionary {
        let path = dir.path().join(dictionary_type.as_str());
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("symbols.dat"), b"symbols").unwrap();
        InstalledDictionary::new(dictionary_type.as_str(), dictionary_type, path)
    }

    fn message(code: SymbolCode, point: GeoPoint) -> SymbologyMessage {
        SymbologyMessage::new(
            MessageId::mint(),
            MessageType::PositionReport,
            vec![point],
            SpatialReference::WGS84,
            AttributeSet::new(code),
        )
    }

    #[test]
    fn test_layers_stack_in_order() {
        let dir = TempDir::new().unwrap();
        let stack = InMemoryLayerStack::new();

        let first = stack.add_message_layer(&installed(&dir, DictionaryType::Mil2525C)).unwrap();
        let second = stack.add_message_layer(&installed(&dir, DictionaryType::App6B)).unwrap();

        assert_eq!(stack.layer_ids(), vec![first.id(), second.id()]);
        assert_eq!(stack.top_layer(), Some(second.id()));
        assert_eq!(
            stack.dictionary(first.id()).unwrap().dictionary_type(),
            DictionaryType::Mil2525C
        );
    }

    #[test]
    fn test_records_accepted_messages() {
        let dir = TempDir::new().unwrap();
        let stack = InMemoryLayerStack::new();
        let layer = stack.add_message_layer(&installed(&dir, DictionaryType::Mil2525C)).unwrap();

        let msg = message(DEFAULT_POSITION_REPORT_CODE, GeoPoint::new(10.0, 20.0));
        layer.process_message(&msg).unwrap();

        assert_eq!(stack.messages(layer.id()), vec![msg]);
        assert_eq!(stack.total_messages(), 1);
    }

    #[test]
    fn test_rejects_foreign_coding_scheme() {
        let dir = TempDir::new().unwrap();
        let stack = InMemoryLayerStack::new();
        let layer = stack.add_message_layer(&installed(&dir, DictionaryType::App6B)).unwrap();

        let emergency = SymbolCode::parse("EFGPA----------").unwrap();
        let result = layer.process_message(&message(emergency, GeoPoint::new(0.0, 0.0)));

        assert!(matches!(result, Err(RejectReason::UnknownSymbolCode { .. })));
        assert!(stack.messages(layer.id()).is_empty());
    }

    #[test]
    fn test_rejects_out_of_bounds_location() {
        let dir = TempDir::new().unwrap();
        let stack = InMemoryLayerStack::new();
        let layer = stack.add_message_layer(&installed(&dir, DictionaryType::Mil2525C)).unwrap();

        let result =
            layer.process_message(&message(DEFAULT_POSITION_REPORT_CODE, GeoPoint::new(10.0, 95.0)));
        match result {
            Err(RejectReason::MalformedGeometry { points, .. }) => assert_eq!(points, "10,95"),
            other => panic!("Expected MalformedGeometry, got {:?}", other),
        }
    }

    #[test]
    fn test_projected_coordinates_skip_bounds_check() {
        let dir = TempDir::new().unwrap();
        let stack = InMemoryLayerStack::new();
        let layer = stack.add_message_layer(&installed(&dir, DictionaryType::Mil2525C)).unwrap();

        let msg = SymbologyMessage::new(
            MessageId::mint(),
            MessageType::PositionReport,
            vec![GeoPoint::new(1_113_194.9, 2_273_030.9)],
            SpatialReference::WEB_MERCATOR,
            AttributeSet::new(DEFAULT_POSITION_REPORT_CODE),
        );
        assert!(layer.process_message(&msg).is_ok());
    }

    #[test]
    fn test_removed_layer_rejects_messages() {
        let dir = TempDir::new().unwrap();
        let stack = InMemoryLayerStack::new();
        let layer = stack.add_message_layer(&installed(&dir, DictionaryType::Mil2525C)).unwrap();

        let accepted = message(DEFAULT_POSITION_REPORT_CODE, GeoPoint::new(1.0, 1.0));
        layer.process_message(&accepted).unwrap();

        assert!(stack.remove_layer(layer.id()));
        assert!(!stack.remove_layer(layer.id()));
        assert_eq!(stack.layer_count(), 0);

        let result =
            layer.process_message(&message(DEFAULT_POSITION_REPORT_CODE, GeoPoint::new(2.0, 2.0)));
        assert!(matches!(result, Err(RejectReason::Backend(_))));
        assert_eq!(stack.messages(layer.id()), vec![accepted]);
    }

    #[test]
    fn test_empty_dictionary_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mil2525c");
        fs::create_dir_all(&path).unwrap();
        let stack = InMemoryLayerStack::new();

        let result = stack.add_message_layer(&InstalledDictionary::new(
            "mil2525c",
            DictionaryType::Mil2525C,
            path,
        ));
        assert!(matches!(result, Err(LayerError::UnsupportedDictionary { .. })));
        assert_eq!(stack.layer_count(), 0);
    }
}
