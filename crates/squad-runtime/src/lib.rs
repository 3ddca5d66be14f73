//! # Squad Runtime
//!
//! Host shell for the advanced-symbology pipeline.
//!
//! ## Structure
//!
//! - `config` - `SL_*` environment configuration
//! - `feed` - Newline-delimited JSON position reports
//! - `runtime` - Startup, event loop and graceful degradation
//!
//! ```text
//! assets/mil2525c ──provision──→ data/dicts/mil2525c
//!                                        │
//!                                       bind
//!                                        ↓
//! stdin reports ──submit──→ SymbologyMessageGate ──→ JSON lines (stdout / SL_MESSAGE_OUT)
//! ```

pub mod config;
pub mod feed;
pub mod runtime;

pub use config::RuntimeConfig;
pub use feed::{parse_line, FeedError, PositionReport};
pub use runtime::{provision, RunSummary, SymbologyRuntime};
