// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Network document loading with override support
//!
//! This module implements the 3-tier loading system:
//! 1. TOML or JSON file (base values)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::{ConfigError, ConfigResult};

/// File names searched for when no path is given, in order
pub const DEFAULT_FILE_NAMES: [&str; 2] = ["column_network.toml", "column_network.json"];

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "COLUMN_CONFIG_PATH";

/// On-disk document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(DocumentFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(DocumentFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Toml => write!(f, "TOML"),
            DocumentFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Find the network configuration file
///
/// Search order:
/// 1. `COLUMN_CONFIG_PATH` environment variable
/// 2. Current working directory: `./column_network.toml`, then `./column_network.json`
/// 3. Up to 5 parent directories, same names
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        let mut current = Some(cwd.as_path());
        for _ in 0..6 {
            let Some(dir) = current else { break };
            for name in DEFAULT_FILE_NAMES {
                search_paths.push(dir.join(name));
            }
            current = dir.parent();
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Network configuration not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        search_list, CONFIG_PATH_ENV
    )))
}

/// Parse a document in the given format into a JSON mapping
pub fn parse_network_document(content: &str, format: DocumentFormat) -> ConfigResult<Value> {
    let parse_error = |message: String| ConfigError::ParseError { format, message };
    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        DocumentFormat::Toml => {
            let table: toml::Value =
                toml::from_str(content).map_err(|e: toml::de::Error| parse_error(e.to_string()))?;
            serde_json::to_value(table).map_err(|e| parse_error(e.to_string()))
        }
    }
}

/// Load a network document from disk
///
/// # Arguments
///
/// * `config_path` - Optional path to the file. If `None`, will search for it.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the file is not found, cannot be read, has an unknown
/// extension, or does not parse.
pub fn load_network_document(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<Value> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };
    let format = DocumentFormat::from_path(&config_file)?;

    info!(target: "column-config", "📖 Loading network config from {}", config_file.display());
    let content = fs::read_to_string(&config_file)?;
    let mut document = parse_network_document(&content, format)?;

    apply_environment_overrides(&mut document);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut document, cli);
    }

    Ok(document)
}

/// Apply environment variable overrides to a network document
///
/// Supported environment variables:
/// - `COLUMN_SENSOR_INPUT_SIZE` -> `sensorInputSize`
/// - `COLUMN_EXTERNAL_INPUT_SIZE` -> `externalInputSize`
/// - `COLUMN_L2_CELL_COUNT` -> `L2Params.cellCount`
///
/// Values that do not parse as unsigned integers are ignored.
pub fn apply_environment_overrides(document: &mut Value) {
    let lookup = |key: &str| env::var(key).ok();
    apply_size_overrides(
        document,
        lookup("COLUMN_SENSOR_INPUT_SIZE"),
        lookup("COLUMN_EXTERNAL_INPUT_SIZE"),
        lookup("COLUMN_L2_CELL_COUNT"),
    );
}

/// Apply CLI argument overrides to a network document
///
/// # Arguments
///
/// * `document` - Document to modify
/// * `cli_args` - Keys `sensor_input_size`, `external_input_size`, `l2_cell_count`
pub fn apply_cli_overrides(document: &mut Value, cli_args: &HashMap<String, String>) {
    apply_size_overrides(
        document,
        cli_args.get("sensor_input_size").cloned(),
        cli_args.get("external_input_size").cloned(),
        cli_args.get("l2_cell_count").cloned(),
    );
}

fn apply_size_overrides(
    document: &mut Value,
    sensor_input_size: Option<String>,
    external_input_size: Option<String>,
    l2_cell_count: Option<String>,
) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    if let Some(size) = parse_size(sensor_input_size) {
        debug!(target: "column-config", "Override sensorInputSize = {}", size);
        root.insert("sensorInputSize".to_string(), Value::from(size));
    }
    if let Some(size) = parse_size(external_input_size) {
        debug!(target: "column-config", "Override externalInputSize = {}", size);
        root.insert("externalInputSize".to_string(), Value::from(size));
    }
    // Only into an existing L2 block; a missing block must still fail validation
    if let Some(count) = parse_size(l2_cell_count) {
        if let Some(l2) = root.get_mut("L2Params").and_then(Value::as_object_mut) {
            debug!(target: "column-config", "Override L2Params.cellCount = {}", count);
            l2.insert("cellCount".to_string(), Value::from(count));
        }
    }
}

fn parse_size(value: Option<String>) -> Option<u32> {
    value.and_then(|v| v.trim().parse::<u32>().ok())
}
