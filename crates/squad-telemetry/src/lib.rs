//! # Squad Telemetry
//!
//! Logging setup shared by the Squad Leader binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use squad_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SL_SERVICE_NAME` | `squad-leader` | Service name logged at startup |
//! | `SL_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `SL_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `SL_JSON_LOGS` | `false` | JSON formatted logs |

mod config;
mod logging;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },

    /// A global subscriber was already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Install the global tracing subscriber described by `config`.
///
/// Fails only if a subscriber is already installed. A filter directive
/// that does not parse is replaced by `info` and reported as a warning.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rejected = logging::init_logging(config)?;

    let level = match &rejected {
        Some(e) => {
            tracing::warn!(error = %e, fallback = logging::FALLBACK_DIRECTIVE, "Log filter rejected");
            logging::FALLBACK_DIRECTIVE
        }
        None => config.log_level.as_str(),
    };
    tracing::info!(
        service = %config.service_name,
        level = %level,
        json = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_filter_does_not_fail_init() {
        let config = TelemetryConfig {
            console_output: false,
            log_level: "[not a filter".to_string(),
            ..TelemetryConfig::default()
        };
        // Only a prior subscriber may make this fail, never the filter.
        assert!(!matches!(
            init_telemetry(&config),
            Err(TelemetryError::Filter { .. })
        ));
    }

    #[test]
    fn test_second_init_fails() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        // Another test in this binary may have installed a subscriber first.
        let _ = init_telemetry(&config);
        assert!(matches!(
            init_telemetry(&config),
            Err(TelemetryError::AlreadyInitialized(_))
        ));
    }
}
