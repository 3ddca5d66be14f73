//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Symbology messages and their identity
//! - Typed attributes and the default/override merge
//! - Event kinds and gate lifecycle states
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod attributes;
pub mod config;
pub mod event;
pub mod message;

pub use attributes::{AttributeKey, AttributeOverrides, AttributeSet, AttributeValue};
pub use config::{GateConfig, DEFAULT_POSITION_REPORT_CODE};
pub use event::{EventKind, GateState};
pub use message::{MessageAction, MessageId, MessageType, SymbologyMessage};
