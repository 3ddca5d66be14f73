//! # Shared Types Crate
//!
//! This crate contains the value types exchanged between the dictionary
//! provisioning subsystem (sl-01) and the symbology gate (sl-02).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Geometry, dictionary and symbol code types
//!   are defined once here.
//! - **Valid by Construction**: A `SymbolCode` that exists has already passed
//!   validation; consumers never re-check its syntax.
//! - **Explicit Hand-off**: `InstalledDictionary` is the only value the gate
//!   accepts at bind time, so provisioning output flows to it explicitly.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
