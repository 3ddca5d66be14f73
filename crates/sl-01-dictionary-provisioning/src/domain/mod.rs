//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Dictionary layout (name validation, derived paths)
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod config;
pub mod layout;

pub use config::ProvisioningConfig;
pub use layout::DictionaryLayout;
