//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for the host application
//! - Driven Ports (outbound) - The map's layer stack and its message layers

pub mod inbound;
pub mod outbound;

pub use inbound::SymbologyGateApi;
pub use outbound::{LayerError, LayerId, LayerStack, MessageLayer, RejectReason};
