//! Service Layer
//!
//! Contains the gate that owns the layer binding and builds messages.

pub mod gate;

pub use gate::{RenderingLayerHandle, SymbologyMessageGate};
