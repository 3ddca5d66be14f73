//! # Squad Leader Test Suite
//!
//! Cross-crate scenarios that exercise provisioning and the symbology gate
//! together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── provisioning_flows.rs  # ensure → InstalledDictionary → bind
//!     └── e2e_symbology.rs       # full pipeline, JSON-lines output, runtime
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sl-tests
//! cargo test -p sl-tests integration::e2e_symbology
//! ```

pub mod integration;
