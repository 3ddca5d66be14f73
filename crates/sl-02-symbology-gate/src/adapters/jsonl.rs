//! JSON-lines layer stack
//!
//! Hands accepted messages to an external renderer as one JSON object per
//! line, using the renderer's flat wire fields (`_id`, `_type`, `_action`,
//! `_wkid`, `_control_points`, `sic`, attribute names).

use parking_lot::Mutex;
use serde_json::Value;
use shared_types::{DictionaryType, InstalledDictionary};
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::{check_dictionary, check_message};
use crate::domain::SymbologyMessage;
use crate::ports::{LayerError, LayerId, LayerStack, MessageLayer, RejectReason};

/// Layer stack whose message layers write JSON lines to `W`
pub struct JsonLinesLayerStack<W: Write + Send + 'static> {
    writer: Arc<Mutex<W>>,
    next_id: AtomicU64,
    layers: Arc<Mutex<Vec<LayerId>>>,
}

impl<W: Write + Send + 'static> JsonLinesLayerStack<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            next_id: AtomicU64::new(0),
            layers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Run `f` with the underlying writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.writer.lock())
    }

    /// Registered layers, bottom to top.
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.lock().clone()
    }
}

impl<W: Write + Send + 'static> LayerStack for JsonLinesLayerStack<W> {
    fn add_message_layer(
        &self,
        dictionary: &InstalledDictionary,
    ) -> Result<Box<dyn MessageLayer>, LayerError> {
        check_dictionary(dictionary)?;

        let id = LayerId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.layers.lock().push(id);
        debug!(layer = %id, dictionary = %dictionary.path().display(), "JSON-lines layer added");

        Ok(Box::new(JsonLinesMessageLayer {
            id,
            dictionary_type: dictionary.dictionary_type(),
            writer: Arc::clone(&self.writer),
            layers: Arc::clone(&self.layers),
        }))
    }

    fn remove_layer(&self, id: LayerId) -> bool {
        let mut layers = self.layers.lock();
        let before = layers.len();
        layers.retain(|l| *l != id);
        layers.len() != before
    }
}

struct JsonLinesMessageLayer<W: Write + Send> {
    id: LayerId,
    dictionary_type: DictionaryType,
    writer: Arc<Mutex<W>>,
    layers: Arc<Mutex<Vec<LayerId>>>,
}

impl<W: Write + Send> MessageLayer for JsonLinesMessageLayer<W> {
    fn id(&self) -> LayerId {
        self.id
    }

    fn process_message(&self, message: &SymbologyMessage) -> Result<(), RejectReason> {
        if !self.layers.lock().contains(&self.id) {
            return Err(RejectReason::Backend(format!(
                "{} is no longer in the stack",
                self.id
            )));
        }
        check_message(self.dictionary_type, message)?;

        let line = serde_json::to_string(&Value::Object(message.to_wire()))
            .map_err(|e| RejectReason::Backend(e.to_string()))?;

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .map_err(|e| RejectReason::Backend(format!("write failed: {}", e)))
    }
}
