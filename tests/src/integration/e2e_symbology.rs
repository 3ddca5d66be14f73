//! # End-to-End Symbology Pipeline
//!
//! Provisioning → bind → submit → renderer output, across all crates.
//!
//! ```text
//! asset bundle ──ensure──→ installed dictionary ──bind──→ message layer
//!                                                            ↑
//! position report ──submit(PositionReport, location, sic)────┘
//! ```

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::TempDir;

    use serde_json::Value;
    use shared_types::{GeoPoint, SymbolCode};
    use sl_01_dictionary_provisioning::{
        DictionaryProvisioner, DictionaryProvisioningApi, ProvisioningConfig,
    };
    use sl_02_symbology_gate::{
        AttributeKey, AttributeOverrides, AttributeSet, AttributeValue, EventKind, GateConfig,
        GateError, InMemoryLayerStack, JsonLinesLayerStack, MessageId, MessageType,
        RejectReason, SymbologyGateApi, SymbologyMessageGate,
    };
    use squad_runtime::{RunSummary, RuntimeConfig, SymbologyRuntime};

    use crate::integration::fixtures::{mil2525c_bundle, write_mil2525c_assets};

    fn provisioned(dir: &TempDir) -> shared_types::InstalledDictionary {
        DictionaryProvisioner::new(Arc::new(mil2525c_bundle()))
            .ensure_dictionary(&ProvisioningConfig::default().with_destination_root(dir.path()))
            .unwrap()
    }

    fn evac() -> SymbolCode {
        SymbolCode::parse("SFGPEVAC-------").unwrap()
    }

    // =============================================================================
    // IN-MEMORY LAYER
    // =============================================================================

    #[test]
    fn test_position_report_reaches_layer_once() {
        let dir = TempDir::new().unwrap();
        let stack = Arc::new(InMemoryLayerStack::new());
        let mut gate = SymbologyMessageGate::new(Arc::clone(&stack), GateConfig::default());
        let layer_id = gate.bind(provisioned(&dir)).unwrap().layer_id();

        let id = gate
            .submit(
                EventKind::PositionReport,
                GeoPoint::new(10.0, 20.0),
                &AttributeOverrides::new().with_symbol_code(evac()),
            )
            .unwrap();

        let messages = stack.messages(layer_id);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id(), id);
        assert_eq!(messages[0].message_type(), MessageType::PositionReport);
        assert_eq!(messages[0].geometry().len(), 1);
        assert_eq!(messages[0].symbol_code(), evac());
    }

    #[test]
    fn test_many_submits_are_distinct_and_ordered() {
        let dir = TempDir::new().unwrap();
        let stack = Arc::new(InMemoryLayerStack::new());
        let mut gate = SymbologyMessageGate::new(Arc::clone(&stack), GateConfig::default());
        let layer_id = gate.bind(provisioned(&dir)).unwrap().layer_id();

        let mut ids = Vec::new();
        for i in 0..200 {
            let location = GeoPoint::new(-120.0 + i as f64 * 0.5, 35.0);
            ids.push(
                gate.submit(EventKind::PositionReport, location, &AttributeOverrides::new())
                    .unwrap(),
            );
        }

        let unique: HashSet<MessageId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 200);

        let forwarded: Vec<MessageId> = stack.messages(layer_id).iter().map(|m| m.id()).collect();
        assert_eq!(forwarded, ids);
    }

    #[test]
    fn test_defaults_and_overrides_combine() {
        let dir = TempDir::new().unwrap();
        let stack = Arc::new(InMemoryLayerStack::new());
        let defaults = AttributeSet::new(evac())
            .with(AttributeKey::HigherFormation, "3-25 AVN")
            .unwrap()
            .with(AttributeKey::StaffComments, "urgent surgical")
            .unwrap();
        let mut gate = SymbologyMessageGate::new(
            Arc::clone(&stack),
            GateConfig::default().with_default_attributes(defaults),
        );
        let layer_id = gate.bind(provisioned(&dir)).unwrap().layer_id();

        let overrides = AttributeOverrides::new()
            .with_symbol_code(SymbolCode::parse("SFGPUCI----D---").unwrap())
            .with(AttributeKey::StaffComments, "routine")
            .unwrap()
            .with(AttributeKey::Speed, 42i64)
            .unwrap();
        gate.submit(EventKind::PositionReport, GeoPoint::new(1.0, 2.0), &overrides)
            .unwrap();

        let msg = &stack.messages(layer_id)[0];
        assert_eq!(msg.symbol_code().as_str(), "SFGPUCI----D---");
        assert_eq!(
            msg.attribute(AttributeKey::StaffComments),
            Some(&AttributeValue::from("routine"))
        );
        assert_eq!(
            msg.attribute(AttributeKey::HigherFormation),
            Some(&AttributeValue::from("3-25 AVN"))
        );
        assert_eq!(msg.attribute(AttributeKey::Speed), Some(&AttributeValue::Integer(42)));
    }

    #[test]
    fn test_rejected_report_leaves_pipeline_running() {
        let dir = TempDir::new().unwrap();
        let stack = Arc::new(InMemoryLayerStack::new());
        let mut gate = SymbologyMessageGate::new(Arc::clone(&stack), GateConfig::default());
        let layer_id = gate.bind(provisioned(&dir)).unwrap().layer_id();

        let bad = AttributeOverrides::new()
            .with(AttributeKey::Direction, 720i64)
            .unwrap();
        match gate.submit(EventKind::PositionReport, GeoPoint::new(1.0, 1.0), &bad) {
            Err(GateError::MessageRejected { reason, .. }) => {
                assert!(matches!(reason, RejectReason::InvalidAttribute { key: AttributeKey::Direction, .. }))
            }
            other => panic!("Expected MessageRejected, got {:?}", other),
        }

        gate.submit(
            EventKind::PositionReport,
            GeoPoint::new(1.0, 1.0),
            &AttributeOverrides::new(),
        )
        .unwrap();
        assert_eq!(stack.messages(layer_id).len(), 1);
    }

    // =============================================================================
    // JSON-LINES RENDERER OUTPUT
    // =============================================================================

    #[test]
    fn test_json_lines_wire_shape() {
        let dir = TempDir::new().unwrap();
        let stack = Arc::new(JsonLinesLayerStack::new(Vec::<u8>::new()));
        let mut gate = SymbologyMessageGate::new(Arc::clone(&stack), GateConfig::default());
        gate.bind(provisioned(&dir)).unwrap();

        let overrides = AttributeOverrides::new()
            .with(AttributeKey::UniqueDesignation, "Dustoff 6")
            .unwrap();
        let id = gate
            .submit(EventKind::PositionReport, GeoPoint::new(10.0, 20.0), &overrides)
            .unwrap();
        gate.close();

        let output = stack.with_writer(|buf| String::from_utf8(buf.clone()).unwrap());
        let lines: Vec<Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 1);
        let msg = &lines[0];
        assert_eq!(msg["_id"], id.to_string());
        assert_eq!(msg["_type"], "position_report");
        assert_eq!(msg["_action"], "update");
        assert_eq!(msg["_wkid"], 4326);
        assert_eq!(msg["_control_points"], "10,20");
        assert_eq!(msg["sic"], "SFGPEVAC-------");
        assert_eq!(msg["uniquedesignation"], "Dustoff 6");
        assert!(stack.layer_ids().is_empty());
    }

    // =============================================================================
    // RUNTIME
    // =============================================================================

    #[tokio::test]
    async fn test_runtime_end_to_end() {
        let dir = TempDir::new().unwrap();
        write_mil2525c_assets(&dir.path().join("assets"));

        let mut config = RuntimeConfig::default();
        config.provisioning.asset_root = dir.path().join("assets");
        config.provisioning.destination_root = dir.path().join("dicts");

        let stack = Arc::new(InMemoryLayerStack::new());
        let runtime = SymbologyRuntime::start(&config, Arc::clone(&stack)).await;
        assert!(runtime.is_bound());
        let layer_id = stack.top_layer().unwrap();

        let input: &[u8] = concat!(
            r#"{"x": 10, "y": 20, "sic": "SFGPEVAC-------"}"#,
            "\n",
            r#"{"x": 11, "y": 21, "uniquedesignation": "Dustoff 6", "quantity": 2}"#,
            "\n",
        )
        .as_bytes();
        let summary = runtime.run(input, std::future::pending()).await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                lines: 2,
                forwarded: 2,
                ..RunSummary::default()
            }
        );

        // Closing removed the layer; its accepted messages stay inspectable
        assert_eq!(stack.layer_count(), 0);
        let messages = stack.messages(layer_id);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].control_points(), "10,20");
        assert_eq!(
            messages[1].attribute(AttributeKey::UniqueDesignation),
            Some(&AttributeValue::from("Dustoff 6"))
        );
        assert_eq!(messages[1].attribute(AttributeKey::Quantity), Some(&AttributeValue::Integer(2)));
        assert_ne!(messages[0].id(), messages[1].id());
        assert!(dir.path().join("dicts").join("mil2525c").join("mil2525c.dat").exists());
    }
}
