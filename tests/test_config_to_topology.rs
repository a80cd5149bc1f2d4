// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end: network documents on disk -> columns in a reference network

use std::collections::HashMap;
use std::fs;

use cortical_column::config::{load_network_document, ConfigError, ToolSettings};
use cortical_column::topology::{
    ColumnNetwork, NetworkConfig, TopologyBuilder, TopologyError, APICAL_INPUT_WIDTH, BASAL_INPUT_WIDTH,
};
use cortical_column::{build_network, logging_config};
use parking_lot::Mutex;
use tempfile::tempdir;

const NETWORK_TOML: &str = r#"
sensorInputSize = 1024
externalInputSize = 512

[L4Params]
columnCount = 1024
cellsPerColumn = 16

[L2Params]
cellCount = 4096
sdrSize = 40

[TMParams]
columnCount = 1024

[tool]
columns = 2
profiling = false
"#;

#[test]
fn test_toml_document_builds_full_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("column_network.toml");
    fs::write(&path, NETWORK_TOML).unwrap();

    let document = load_network_document(Some(&path), None).unwrap();
    let settings = ToolSettings::from_document(&document).unwrap();
    let built = build_network(document, &settings).unwrap();

    assert_eq!(built.columns.len(), 2);
    assert_eq!(built.network.region_count(), 10);
    assert_eq!(built.network.links().len(), 20);
    assert!(built.network.check_causality().is_ok());

    let l4 = built.network.region("L4Column_1").unwrap();
    assert_eq!(l4.params[BASAL_INPUT_WIDTH], 512);
    assert_eq!(l4.params[APICAL_INPUT_WIDTH], 4096);
    assert_eq!(l4.params["cellsPerColumn"], 16);
}

#[test]
fn test_json_document_with_cli_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("network.json");
    fs::write(
        &path,
        r#"{
            "sensorInputSize": 32,
            "externalInputSize": 8,
            "L4Params": {},
            "L2Params": {"cellCount": 64},
            "TMParams": {}
        }"#,
    )
    .unwrap();

    let mut cli_args = HashMap::new();
    cli_args.insert("external_input_size".to_string(), "0".to_string());
    cli_args.insert("l2_cell_count".to_string(), "128".to_string());
    let document = load_network_document(Some(&path), Some(&cli_args)).unwrap();

    let built = build_network(document, &ToolSettings::default()).unwrap();

    assert_eq!(built.network.region_count(), 4);
    assert!(built.network.region("externalInput").is_none());
    assert_eq!(
        built.network.region("L4Column").unwrap().params[APICAL_INPUT_WIDTH],
        128
    );
    assert!(built.network.profiling_enabled());
}

#[test]
fn test_document_missing_l2_params_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("network.toml");
    fs::write(
        &path,
        "sensorInputSize = 16\nexternalInputSize = 0\n[L4Params]\n[TMParams]\n",
    )
    .unwrap();

    let document = load_network_document(Some(&path), None).unwrap();
    let err = build_network(document, &ToolSettings::default()).unwrap_err();

    assert_eq!(
        err,
        TopologyError::Configuration {
            key: "L2Params".to_string()
        }
    );
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("network.yaml");
    fs::write(&path, "sensorInputSize: 16").unwrap();

    let err = load_network_document(Some(&path), None).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn test_shared_network_from_loaded_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("column_network.toml");
    fs::write(&path, NETWORK_TOML).unwrap();
    let config = NetworkConfig::new(load_network_document(Some(&path), None).unwrap());

    let shared = Mutex::new(ColumnNetwork::new());
    std::thread::scope(|scope| {
        for suffix in ["_north", "_south"] {
            let config = &config;
            let shared = &shared;
            scope.spawn(move || {
                let mut engine = shared;
                TopologyBuilder::new()
                    .build(&mut engine, config, suffix)
                    .unwrap();
            });
        }
    });

    let network = shared.into_inner();
    assert_eq!(network.region_count(), 10);
    assert!(network.check_causality().is_ok());
}

#[test]
fn test_tool_logging_settings() {
    let settings = ToolSettings {
        log_format: "json".to_string(),
        ..ToolSettings::default()
    };
    assert!(settings.validate().is_ok());
    assert_eq!(logging_config(&settings).level, "info");
}
