//! Subscriber setup.
//!
//! Logs go to stderr so stdout stays free for message output. JSON output
//! carries target, thread, file and line fields for log shippers.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Directive used when the configured one does not parse.
pub(crate) const FALLBACK_DIRECTIVE: &str = "info";

/// Build the filter from the configured directive. An unparsable
/// directive falls back to `info`; the parse error is handed back so it
/// can be logged once the subscriber is up.
pub(crate) fn env_filter(config: &TelemetryConfig) -> (EnvFilter, Option<TelemetryError>) {
    match EnvFilter::try_new(&config.log_level) {
        Ok(filter) => (filter, None),
        Err(e) => (
            EnvFilter::new(FALLBACK_DIRECTIVE),
            Some(TelemetryError::Filter {
                directive: config.log_level.clone(),
                reason: e.to_string(),
            }),
        ),
    }
}

/// Install the global subscriber. Returns the rejected filter, if any.
pub(crate) fn init_logging(
    config: &TelemetryConfig,
) -> Result<Option<TelemetryError>, TelemetryError> {
    let (env_filter, rejected) = env_filter(config);

    if !config.console_output {
        return tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map(|()| rejected)
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()));
    }

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map(|()| rejected)
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map(|()| rejected)
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
    }
}
