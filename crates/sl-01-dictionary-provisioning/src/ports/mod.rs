//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for the host application
//! - Driven Ports (outbound) - The read-only asset bundle

pub mod inbound;
pub mod outbound;

pub use inbound::DictionaryProvisioningApi;
pub use outbound::{AssetEntry, AssetKind, AssetSource};
