//! Metrics for gate operations

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for a symbology gate
#[derive(Debug, Default)]
pub struct GateMetrics {
    /// Messages handed to the layer
    pub submitted: AtomicU64,
    /// Messages the layer processed
    pub accepted: AtomicU64,
    /// Messages the layer refused
    pub rejected: AtomicU64,
    /// Submissions refused because the gate was not bound
    pub not_bound: AtomicU64,
}

impl GateMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_bound(&self) {
        self.not_bound.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            not_bound: self.not_bound.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub submitted: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub not_bound: u64,
}
