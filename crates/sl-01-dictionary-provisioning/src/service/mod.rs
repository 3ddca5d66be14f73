//! Service Layer
//!
//! Contains the application service that orchestrates provisioning
//! through the asset source port.

pub mod provisioner;

pub use provisioner::DictionaryProvisioner;
