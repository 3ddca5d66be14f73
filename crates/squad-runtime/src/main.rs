//! # Squad Leader Symbology Runtime
//!
//! Reads position reports from stdin and writes dictionary-keyed messages
//! as JSON lines for the renderer. Logs go to stderr.
//!
//! ```text
//! SL_ASSET_ROOT=./assets SL_DICTIONARY_ROOT=./data/dicts \
//!     squad-runtime < reports.jsonl > messages.jsonl
//! ```

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use sl_02_symbology_gate::JsonLinesLayerStack;
use squad_runtime::{RuntimeConfig, SymbologyRuntime};
use squad_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{info, warn};

fn message_writer(config: &RuntimeConfig) -> Result<Box<dyn Write + Send>> {
    match &config.message_out {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            info!(path = %path.display(), "Writing messages to file");
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry(&TelemetryConfig::for_component("runtime"))?;

    let config = RuntimeConfig::from_env();
    info!(
        dictionary = %config.provisioning.dictionary_name,
        dictionary_type = %config.provisioning.dictionary_type,
        assets = %config.provisioning.asset_root.display(),
        destination = %config.provisioning.destination_root.display(),
        "Starting symbology runtime"
    );

    let stack = Arc::new(JsonLinesLayerStack::new(message_writer(&config)?));
    let runtime = SymbologyRuntime::start(&config, stack).await;

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    runtime.run(input, shutdown).await?;
    Ok(())
}
