//! Dictionary Provisioner
//!
//! Copies a dictionary out of the asset bundle into durable storage the
//! first time it is needed and verifies the result.

use shared_types::InstalledDictionary;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
#[cfg(feature = "locking")]
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::{DictionaryLayout, ProvisioningConfig};
use crate::error::{AssetError, ProvisioningError};
use crate::metrics::ProvisioningMetrics;
use crate::ports::{AssetKind, AssetSource, DictionaryProvisioningApi};

/// Distinguishes staging directories of attempts within one process.
static ATTEMPT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Why a copy attempt failed. Collapsed into `DictionaryUnavailable`
/// before it leaves the service.
#[derive(Debug, Error)]
enum InstallError {
    #[error("asset bundle has no folder {0:?}")]
    MissingBundle(String),

    #[error("asset folder {0:?} contains no files")]
    EmptyBundle(String),

    #[error("invalid asset entry name {0:?}")]
    InvalidEntry(String),

    #[error("asset read failed: {0}")]
    Asset(#[from] AssetError),

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> InstallError + '_ {
    move |source| InstallError::Write {
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Debug, Default)]
struct CopyStats {
    files: u64,
    bytes: u64,
}

/// Dictionary Provisioner implementation
///
/// Implements the `DictionaryProvisioningApi` port over an injected asset
/// source. Performs blocking file I/O.
pub struct DictionaryProvisioner<A: AssetSource> {
    /// Read-only asset bundle (driven port)
    assets: Arc<A>,
    metrics: Arc<ProvisioningMetrics>,
}

impl<A: AssetSource> DictionaryProvisioner<A> {
    pub fn new(assets: Arc<A>) -> Self {
        Self {
            assets,
            metrics: Arc::new(ProvisioningMetrics::new()),
        }
    }

    /// Share an existing metrics collector
    pub fn with_metrics(assets: Arc<A>, metrics: Arc<ProvisioningMetrics>) -> Self {
        Self { assets, metrics }
    }

    pub fn metrics(&self) -> &ProvisioningMetrics {
        &self.metrics
    }

    /// `ensure` under an exclusive per-dictionary file lock.
    ///
    /// An already installed dictionary is returned without taking the lock.
    /// Existence is re-checked once the lock is held, so a dictionary
    /// installed by the previous holder is not copied again.
    #[cfg(feature = "locking")]
    pub fn ensure_locked(
        &self,
        dictionary_name: &str,
        destination_root: &Path,
        timeout: Duration,
    ) -> Result<PathBuf, ProvisioningError> {
        use crate::adapters::ProvisioningLock;

        let layout = self.layout(dictionary_name, destination_root)?;
        if layout.installed_path().exists() {
            return self.ensure(dictionary_name, destination_root);
        }

        let _lock = ProvisioningLock::acquire(layout.lock_path(), timeout).map_err(|e| {
            warn!(dictionary = dictionary_name, error = %e, "Could not lock dictionary for provisioning");
            self.unavailable(dictionary_name, layout.installed_path(), e.to_string())
        })?;

        self.ensure(dictionary_name, destination_root)
    }

    fn layout(
        &self,
        dictionary_name: &str,
        destination_root: &Path,
    ) -> Result<DictionaryLayout, ProvisioningError> {
        DictionaryLayout::new(dictionary_name, destination_root).map_err(|reason| {
            self.unavailable(dictionary_name, &destination_root.join(dictionary_name), reason)
        })
    }

    fn unavailable(&self, name: &str, path: &Path, reason: String) -> ProvisioningError {
        self.metrics.record_failure();
        ProvisioningError::DictionaryUnavailable {
            name: name.to_string(),
            path: path.to_path_buf(),
            reason,
        }
    }

    /// Copy the bundle into a fresh staging directory, then rename it onto
    /// the installed path. The staging directory is removed on failure.
    fn install(&self, layout: &DictionaryLayout) -> Result<CopyStats, InstallError> {
        let prefix = layout.asset_prefix();
        if !self.assets.exists(prefix) {
            return Err(InstallError::MissingBundle(prefix.to_string()));
        }

        let root = layout.destination_root();
        fs::create_dir_all(root).map_err(write_error(root))?;

        let attempt = format!(
            "{}-{}",
            std::process::id(),
            ATTEMPT_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        let staging = layout.staging_path(&attempt);
        fs::create_dir_all(&staging).map_err(write_error(&staging))?;

        let mut stats = CopyStats::default();
        let result = self
            .copy_tree(prefix, &staging, &mut stats)
            .and_then(|()| {
                if stats.files == 0 {
                    Err(InstallError::EmptyBundle(prefix.to_string()))
                } else {
                    Ok(())
                }
            })
            .and_then(|()| {
                fs::rename(&staging, layout.installed_path())
                    .map_err(write_error(layout.installed_path()))
            });

        if result.is_err() {
            if let Err(e) = fs::remove_dir_all(&staging) {
                warn!(path = %staging.display(), error = %e, "Failed to remove staging directory");
            }
        }

        result.map(|()| stats)
    }

    fn copy_tree(
        &self,
        prefix: &str,
        dest: &Path,
        stats: &mut CopyStats,
    ) -> Result<(), InstallError> {
        for entry in self.assets.list(prefix)? {
            let name = entry.name.as_str();
            if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
                return Err(InstallError::InvalidEntry(entry.name.clone()));
            }

            let source = format!("{}/{}", prefix, name);
            let target = dest.join(name);

            match entry.kind {
                AssetKind::Directory => {
                    fs::create_dir_all(&target).map_err(write_error(&target))?;
                    self.copy_tree(&source, &target, stats)?;
                }
                AssetKind::File => {
                    let bytes = self.assets.read(&source)?;
                    fs::write(&target, &bytes).map_err(write_error(&target))?;
                    stats.files += 1;
                    stats.bytes += bytes.len() as u64;
                    debug!(asset = %source, bytes = bytes.len(), "Copied asset");
                }
            }
        }
        Ok(())
    }
}

impl<A: AssetSource> DictionaryProvisioningApi for DictionaryProvisioner<A> {
    fn ensure(
        &self,
        dictionary_name: &str,
        destination_root: &Path,
    ) -> Result<PathBuf, ProvisioningError> {
        let layout = self.layout(dictionary_name, destination_root)?;
        let installed = layout.installed_path();

        if installed.exists() {
            debug!(
                dictionary = dictionary_name,
                path = %installed.display(),
                "Dictionary already provisioned"
            );
            self.metrics.record_already_present();
            return Ok(installed.to_path_buf());
        }

        info!(
            dictionary = dictionary_name,
            path = %installed.display(),
            "Provisioning dictionary from assets"
        );
        let outcome = self.install(&layout);

        // Existence after the attempt is the only success criterion
        if !installed.exists() {
            let reason = match &outcome {
                Err(e) => e.to_string(),
                Ok(_) => "installed directory missing after copy".to_string(),
            };
            error!(
                dictionary = dictionary_name,
                path = %installed.display(),
                reason = %reason,
                "Dictionary unavailable"
            );
            return Err(self.unavailable(dictionary_name, installed, reason));
        }

        match outcome {
            Ok(stats) => {
                self.metrics.record_provisioned(stats.files, stats.bytes);
                info!(
                    dictionary = dictionary_name,
                    files = stats.files,
                    bytes = stats.bytes,
                    "Dictionary provisioned"
                );
            }
            Err(e) => {
                // A concurrent provisioner finished first
                warn!(
                    dictionary = dictionary_name,
                    error = %e,
                    "Copy attempt failed but dictionary is present"
                );
                self.metrics.record_already_present();
            }
        }

        Ok(installed.to_path_buf())
    }

    fn ensure_dictionary(
        &self,
        config: &ProvisioningConfig,
    ) -> Result<InstalledDictionary, ProvisioningError> {
        config.validate()?;

        #[cfg(feature = "locking")]
        let path = if config.use_lock {
            self.ensure_locked(
                &config.dictionary_name,
                &config.destination_root,
                Duration::from_secs(config.lock_timeout_secs),
            )?
        } else {
            self.ensure(&config.dictionary_name, &config.destination_root)?
        };

        #[cfg(not(feature = "locking"))]
        let path = {
            if config.use_lock {
                warn!("Provisioning lock requested but the `locking` feature is disabled");
            }
            self.ensure(&config.dictionary_name, &config.destination_root)?
        };

        Ok(InstalledDictionary::new(
            config.dictionary_name.clone(),
            config.dictionary_type,
            path,
        ))
    }
}
