// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Tool settings
//!
//! Settings for the `build_topology` tool live next to the network keys, in an
//! optional `tool` section of the same document. The builder ignores the section.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ConfigError, ConfigResult};

/// Key of the tool section inside a network document
pub const TOOL_SECTION: &str = "tool";

/// How the tool lays out and reports columns
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Number of columns to build
    pub columns: usize,
    /// Suffix of a single column; ignored when `columns > 1` (indexed suffixes are used)
    pub suffix: String,
    pub profiling: bool,
    pub log_level: String,
    /// "text" or "json"
    pub log_format: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            columns: 1,
            suffix: String::new(),
            profiling: true,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl ToolSettings {
    /// Read the `tool` section of a network document, defaults when absent
    pub fn from_document(document: &Value) -> ConfigResult<Self> {
        match document.get(TOOL_SECTION) {
            None => Ok(Self::default()),
            Some(section) => serde_json::from_value(section.clone())
                .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", TOOL_SECTION, e))),
        }
    }

    /// Apply CLI overrides (`columns`, `suffix`, `profiling`, `log_level`, `log_format`)
    pub fn apply_cli_overrides(&mut self, cli_args: &HashMap<String, String>) {
        if let Some(value) = cli_args.get("columns") {
            if let Ok(columns) = value.parse::<usize>() {
                self.columns = columns;
            }
        }
        if let Some(value) = cli_args.get("suffix") {
            self.suffix = value.clone();
        }
        if let Some(value) = cli_args.get("profiling") {
            self.profiling =
                value.to_lowercase() == "true" || value == "1" || value.to_lowercase() == "yes";
        }
        if let Some(value) = cli_args.get("log_level") {
            self.log_level = value.clone();
        }
        if let Some(value) = cli_args.get("log_format") {
            self.log_format = value.clone();
        }
    }

    /// # Errors
    ///
    /// `ConfigError::InvalidValue` for zero columns or an unknown log format
    pub fn validate(&self) -> ConfigResult<()> {
        if self.columns == 0 {
            return Err(ConfigError::InvalidValue(
                "tool.columns must be at least 1".to_string(),
            ));
        }
        if !matches!(self.log_format.as_str(), "text" | "json") {
            return Err(ConfigError::InvalidValue(format!(
                "tool.log_format must be \"text\" or \"json\", got {:?}",
                self.log_format
            )));
        }
        Ok(())
    }
}
