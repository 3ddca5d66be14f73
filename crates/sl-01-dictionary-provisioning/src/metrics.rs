//! Metrics for provisioning operations
//!
//! Thread-safe counters the host can snapshot for diagnostics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for provisioning
#[derive(Debug, Default)]
pub struct ProvisioningMetrics {
    /// Dictionaries copied from the asset bundle
    pub provisioned: AtomicU64,
    /// `ensure` calls that found the dictionary already installed
    pub already_present: AtomicU64,
    /// `ensure` calls that ended in `DictionaryUnavailable`
    pub failures: AtomicU64,
    /// Files written across all provisions
    pub files_copied: AtomicU64,
    /// Bytes written across all provisions
    pub bytes_copied: AtomicU64,
}

impl ProvisioningMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_provisioned(&self, files: u64, bytes: u64) {
        self.provisioned.fetch_add(1, Ordering::Relaxed);
        self.files_copied.fetch_add(files, Ordering::Relaxed);
        self.bytes_copied.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_already_present(&self) {
        self.already_present.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            provisioned: self.provisioned.load(Ordering::Relaxed),
            already_present: self.already_present.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            files_copied: self.files_copied.load(Ordering::Relaxed),
            bytes_copied: self.bytes_copied.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub provisioned: u64,
    pub already_present: u64,
    pub failures: u64,
    pub files_copied: u64,
    pub bytes_copied: u64,
}
