//! # SL-02 Symbology Gate
//!
//! Binds a provisioned symbol dictionary to a live message layer and turns
//! domain events into dictionary-keyed messages for that layer.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure types, no I/O
//!   - `SymbologyMessage`: One unit of work for the renderer
//!   - `AttributeSet` / `AttributeOverrides`: Typed attributes and merging
//!   - `GateConfig`: Default attributes and spatial reference
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `SymbologyGateApi`: Driving port (inbound API)
//!   - `LayerStack` / `MessageLayer`: Driven ports (external renderer)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `SymbologyMessageGate`: Implements `SymbologyGateApi`
//!
//! - **Adapters Layer** (`adapters/`): Renderer connections
//!   - `InMemoryLayerStack`: Ordered in-process stack that records messages
//!   - `JsonLinesLayerStack`: Writes messages as JSON lines
//!
//! ## Lifecycle
//!
//! ```text
//! Unbound ──bind──→ Bound ──close──→ Closed
//!                    │  ↑
//!                    └──┘ submit
//! ```
//!
//! ## Invariants
//!
//! - **Gate-minted identity**: every message id is a fresh UUID v4 created
//!   by the gate, never by the caller.
//! - **Synchronous hand-off**: exactly one message reaches the layer per
//!   successful `submit`, before `submit` returns. Nothing is queued,
//!   retried or retained.
//! - **Per-call rejection**: a rejected message leaves the gate bound.
//!
//! ## Usage Example
//!
//! ```ignore
//! use sl_02_symbology_gate::{
//!     AttributeOverrides, EventKind, GateConfig, InMemoryLayerStack,
//!     SymbologyGateApi, SymbologyMessageGate,
//! };
//! use shared_types::GeoPoint;
//! use std::sync::Arc;
//!
//! let stack = Arc::new(InMemoryLayerStack::new());
//! let mut gate = SymbologyMessageGate::new(stack, GateConfig::default());
//! gate.bind(installed_dictionary)?;
//!
//! let id = gate.submit(
//!     EventKind::PositionReport,
//!     GeoPoint::new(10.0, 20.0),
//!     &AttributeOverrides::new(),
//! )?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{InMemoryLayerStack, JsonLinesLayerStack};
pub use domain::{
    AttributeKey, AttributeOverrides, AttributeSet, AttributeValue, EventKind, GateConfig,
    GateState, MessageAction, MessageId, MessageType, SymbologyMessage,
    DEFAULT_POSITION_REPORT_CODE,
};
pub use error::GateError;
pub use metrics::{GateMetrics, MetricsSnapshot};
pub use ports::{LayerError, LayerId, LayerStack, MessageLayer, RejectReason, SymbologyGateApi};
pub use service::{RenderingLayerHandle, SymbologyMessageGate};
