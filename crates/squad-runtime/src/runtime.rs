//! # Symbology Runtime
//!
//! ## Startup Sequence
//!
//! 1. Provision the dictionary on a blocking thread
//! 2. Bind the gate to the installed dictionary
//! 3. Feed position reports until input ends or shutdown is signalled
//! 4. Close the gate, removing its layer
//!
//! A failure in step 1 or 2 is not fatal: the shell keeps draining input
//! without advanced symbology, as the map itself still works.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use shared_types::InstalledDictionary;
use sl_01_dictionary_provisioning::{
    DictionaryProvisioner, DictionaryProvisioningApi, DirectoryAssetSource, ProvisioningConfig,
};
use sl_02_symbology_gate::{
    EventKind, GateError, GateState, LayerStack, SymbologyGateApi, SymbologyMessageGate,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info, warn};

use crate::config::RuntimeConfig;
use crate::feed::parse_line;

/// Counters reported when the runtime stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank input lines
    pub lines: u64,
    /// Messages accepted by the layer
    pub forwarded: u64,
    /// Messages the layer refused
    pub rejected: u64,
    /// Lines that were not valid position reports
    pub malformed: u64,
    /// Reports dropped because no symbology layer is bound
    pub unbound: u64,
}

/// Provision the configured dictionary from the on-disk asset bundle.
///
/// Runs the blocking copy on tokio's blocking pool.
pub async fn provision(config: ProvisioningConfig) -> Result<InstalledDictionary> {
    let dictionary = config.dictionary_name.clone();
    tokio::task::spawn_blocking(move || {
        let assets = Arc::new(DirectoryAssetSource::new(config.asset_root.clone()));
        DictionaryProvisioner::new(assets).ensure_dictionary(&config)
    })
    .await
    .context("Provisioning task panicked")?
    .with_context(|| format!("Failed to provision dictionary {:?}", dictionary))
}

/// Host shell driving one symbology gate.
pub struct SymbologyRuntime<S: LayerStack> {
    gate: SymbologyMessageGate<S>,
    summary: RunSummary,
}

impl<S: LayerStack> SymbologyRuntime<S> {
    /// Provision and bind. Failures degrade to a runtime without a bound
    /// gate instead of an error.
    pub async fn start(config: &RuntimeConfig, stack: Arc<S>) -> Self {
        let mut gate = SymbologyMessageGate::new(stack, config.gate_config());

        match provision(config.provisioning.clone()).await {
            Ok(dictionary) => {
                if let Err(e) = gate.bind(dictionary) {
                    warn!(error = %e, "Symbology layer unavailable, continuing without it");
                }
            }
            Err(e) => {
                error!(error = %format!("{:#}", e), "Continuing without advanced symbology");
            }
        }

        Self {
            gate,
            summary: RunSummary::default(),
        }
    }

    /// Wrap an already configured gate.
    pub fn with_gate(gate: SymbologyMessageGate<S>) -> Self {
        Self {
            gate,
            summary: RunSummary::default(),
        }
    }

    pub fn gate(&self) -> &SymbologyMessageGate<S> {
        &self.gate
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Process one input line.
    pub fn handle_line(&mut self, line: &str) {
        let report = match parse_line(line) {
            Ok(Some(report)) => report,
            Ok(None) => return,
            Err(e) => {
                self.summary.lines += 1;
                self.summary.malformed += 1;
                warn!(error = %e, "Skipping malformed report");
                return;
            }
        };
        self.summary.lines += 1;

        match self
            .gate
            .submit(EventKind::PositionReport, report.location, &report.overrides)
        {
            Ok(id) => {
                self.summary.forwarded += 1;
                debug!(message_id = %id, location = %report.location, "Position report forwarded");
            }
            Err(GateError::GateNotBound) => self.summary.unbound += 1,
            Err(e) => {
                self.summary.rejected += 1;
                warn!(error = %e, "Position report dropped");
            }
        }
    }

    /// Feed `input` line by line until it ends or `shutdown` completes,
    /// then close the gate.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily and end up
    /// counted as malformed. Only an I/O error stops the loop early.
    pub async fn run<R, F>(mut self, mut input: R, shutdown: F) -> Result<RunSummary>
    where
        R: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        info!(state = %self.gate.state(), "Reading position reports");
        let mut buf = Vec::new();
        tokio::pin!(shutdown);

        loop {
            buf.clear();
            tokio::select! {
                read = input.read_until(b'\n', &mut buf) => {
                    if read.context("Failed to read position reports")? == 0 {
                        info!("Input closed");
                        break;
                    }
                    let line = String::from_utf8_lossy(&buf);
                    self.handle_line(line.trim_end_matches(['\n', '\r']));
                }
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        self.gate.close();
        let summary = self.summary.clone();
        info!(
            lines = summary.lines,
            forwarded = summary.forwarded,
            rejected = summary.rejected,
            malformed = summary.malformed,
            unbound = summary.unbound,
            "Runtime stopped"
        );
        Ok(summary)
    }

    /// Whether advanced symbology is active.
    pub fn is_bound(&self) -> bool {
        self.gate.state() == GateState::Bound
    }
}
