//! # SL-01 Dictionary Provisioning
//!
//! Makes a symbol dictionary's backing files available at a stable, writable
//! location, copying them from a read-only asset bundle exactly when missing.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure rules, no I/O
//!   - `DictionaryLayout`: Validated name and derived paths
//!   - `ProvisioningConfig`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `DictionaryProvisioningApi`: Driving port (inbound API)
//!   - `AssetSource`: Driven port (read-only asset bundle)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `DictionaryProvisioner`: Implements `DictionaryProvisioningApi`
//!
//! - **Adapters Layer** (`adapters/`): External connections
//!   - `DirectoryAssetSource`: Asset bundle on disk
//!   - `InMemoryAssetSource`: Asset bundle held in memory
//!   - `ProvisioningLock`: Cross-process exclusion (feature `locking`)
//!
//! ## Invariants
//!
//! - **Idempotence**: Existence of the installed directory is the sole
//!   completeness signal; a second `ensure` is a no-op.
//! - **Verified Post-Condition**: `ensure` returns only when the installed
//!   directory exists; every lower-level failure becomes
//!   `ProvisioningError::DictionaryUnavailable`.
//! - **No Partial Installs**: Files are staged in a sibling directory and
//!   renamed into place once complete.
//!
//! ## Usage Example
//!
//! ```ignore
//! use sl_01_dictionary_provisioning::{
//!     DictionaryProvisioner, DictionaryProvisioningApi, DirectoryAssetSource,
//! };
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let assets = Arc::new(DirectoryAssetSource::new("./assets"));
//! let provisioner = DictionaryProvisioner::new(assets);
//!
//! let installed = provisioner.ensure("mil2525c", Path::new("./data/dicts"))?;
//! assert!(installed.exists());
//! ```
//!
//! Provisioning performs blocking file I/O; async hosts should run it on a
//! blocking thread (e.g. `tokio::task::spawn_blocking`).

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{DirectoryAssetSource, InMemoryAssetSource};
#[cfg(feature = "locking")]
pub use adapters::{LockError, ProvisioningLock};
pub use domain::{DictionaryLayout, ProvisioningConfig};
pub use error::{AssetError, ProvisioningError};
pub use metrics::{MetricsSnapshot, ProvisioningMetrics};
pub use ports::{AssetEntry, AssetKind, AssetSource, DictionaryProvisioningApi};
pub use service::DictionaryProvisioner;
