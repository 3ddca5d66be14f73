//! # Provisioning Flows
//!
//! Tests that sl-01-dictionary-provisioning produces dictionaries the
//! sl-02-symbology-gate can bind to, and that provisioning failures stop
//! the pipeline before any message is produced.
//!
//! ## Flow Tested:
//!
//! 1. **ensure → bind**: the installed path becomes the gate's dictionary
//! 2. **Idempotence**: a second ensure copies nothing and changes nothing
//! 3. **Missing assets**: no installed path, bind refused, nothing forwarded

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    use shared_types::{DictionaryType, GeoPoint, InstalledDictionary};
    use sl_01_dictionary_provisioning::{
        DictionaryProvisioner, DictionaryProvisioningApi, DirectoryAssetSource,
        InMemoryAssetSource, ProvisioningConfig, ProvisioningError,
    };
    use sl_02_symbology_gate::{
        AttributeOverrides, EventKind, GateConfig, GateError, GateState, InMemoryLayerStack,
        SymbologyGateApi, SymbologyMessageGate,
    };

    use crate::integration::fixtures::{mil2525c_bundle, write_mil2525c_assets};

    fn snapshot_tree(root: &Path) -> Vec<(String, Vec<u8>)> {
        let mut files = Vec::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
                    files.push((rel, fs::read(&path).unwrap()));
                }
            }
        }
        files.sort();
        files
    }

    // =============================================================================
    // ENSURE → BIND
    // =============================================================================

    #[test]
    fn test_provisioned_dictionary_binds() {
        let dir = TempDir::new().unwrap();
        let provisioner = DictionaryProvisioner::new(Arc::new(mil2525c_bundle()));
        let config = ProvisioningConfig::default().with_destination_root(dir.path());

        let installed = provisioner.ensure_dictionary(&config).unwrap();
        assert_eq!(installed.path(), dir.path().join("mil2525c"));
        assert_eq!(installed.dictionary_type(), DictionaryType::Mil2525C);

        let stack = Arc::new(InMemoryLayerStack::new());
        let mut gate = SymbologyMessageGate::new(Arc::clone(&stack), GateConfig::default());
        let layer_id = gate.bind(installed).unwrap().layer_id();

        assert_eq!(gate.state(), GateState::Bound);
        assert_eq!(stack.top_layer(), Some(layer_id));
        assert_eq!(
            stack.dictionary(layer_id).unwrap().path(),
            dir.path().join("mil2525c")
        );
    }

    #[test]
    fn test_copy_preserves_relative_paths_and_bytes() {
        let dir = TempDir::new().unwrap();
        let assets = dir.path().join("assets");
        write_mil2525c_assets(&assets);

        let provisioner = DictionaryProvisioner::new(Arc::new(DirectoryAssetSource::new(&assets)));
        let installed = provisioner
            .ensure("mil2525c", &dir.path().join("dicts"))
            .unwrap();

        assert_eq!(
            snapshot_tree(&installed),
            snapshot_tree(&assets.join("mil2525c"))
        );
    }

    // =============================================================================
    // IDEMPOTENCE
    // =============================================================================

    #[test]
    fn test_second_ensure_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let provisioner = DictionaryProvisioner::new(Arc::new(mil2525c_bundle()));

        let first = provisioner.ensure("mil2525c", dir.path()).unwrap();
        let before = snapshot_tree(&first);
        let second = provisioner.ensure("mil2525c", dir.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(snapshot_tree(&second), before);

        let metrics = provisioner.metrics().snapshot();
        assert_eq!(metrics.provisioned, 1);
        assert_eq!(metrics.already_present, 1);
        assert_eq!(metrics.files_copied, 4);
    }

    #[test]
    fn test_existing_directory_counts_as_installed() {
        let dir = TempDir::new().unwrap();
        // Present but unrelated content: existence is the only signal
        fs::create_dir_all(dir.path().join("mil2525c")).unwrap();
        fs::write(dir.path().join("mil2525c").join("marker"), b"keep").unwrap();

        let provisioner = DictionaryProvisioner::new(Arc::new(mil2525c_bundle()));
        let installed = provisioner.ensure("mil2525c", dir.path()).unwrap();

        assert_eq!(snapshot_tree(&installed).len(), 1);
        assert_eq!(provisioner.metrics().snapshot().provisioned, 0);
    }

    // =============================================================================
    // MISSING ASSETS
    // =============================================================================

    #[test]
    fn test_missing_assets_stop_the_pipeline() {
        let dir = TempDir::new().unwrap();
        let provisioner = DictionaryProvisioner::new(Arc::new(InMemoryAssetSource::new()));
        let config = ProvisioningConfig::default().with_destination_root(dir.path());

        let err = provisioner.ensure_dictionary(&config).unwrap_err();
        assert!(matches!(err, ProvisioningError::DictionaryUnavailable { .. }));
        assert!(!dir.path().join("mil2525c").exists());

        // A host that ignores the failure still cannot bind
        let stack = Arc::new(InMemoryLayerStack::new());
        let mut gate = SymbologyMessageGate::new(Arc::clone(&stack), GateConfig::default());
        let missing = InstalledDictionary::new(
            "mil2525c",
            DictionaryType::Mil2525C,
            dir.path().join("mil2525c"),
        );
        let bind = gate.bind(missing).map(|h| h.layer_id());
        assert!(matches!(bind, Err(GateError::DictionaryUnavailable { .. })));

        let submit = gate.submit(
            EventKind::PositionReport,
            GeoPoint::new(10.0, 20.0),
            &AttributeOverrides::new(),
        );
        assert_eq!(submit, Err(GateError::GateNotBound));
        assert_eq!(stack.total_messages(), 0);
        assert_eq!(stack.layer_count(), 0);
    }

    #[test]
    fn test_locked_provisioning_between_provisioners() {
        let dir = TempDir::new().unwrap();
        let config = ProvisioningConfig::default()
            .with_destination_root(dir.path())
            .with_lock(true);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let config = config.clone();
                std::thread::spawn(move || {
                    DictionaryProvisioner::new(Arc::new(mil2525c_bundle()))
                        .ensure_dictionary(&config)
                })
            })
            .collect();

        for handle in handles {
            let installed = handle.join().unwrap().unwrap();
            assert!(installed.path().join("mil2525c.dat").exists());
        }

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.contains(".partial"))
            .collect();
        assert!(leftovers.is_empty(), "staging directories left: {:?}", leftovers);
    }
}
