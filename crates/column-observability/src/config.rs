// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level for crates without a debug flag (trace, debug, info, warn, error)
    pub level: String,

    /// Console format
    pub format: LogFormat,

    /// Base directory for file logs (used with the `file-logging` feature)
    pub log_dir: Option<PathBuf>,

    /// Keep this many most recent run directories
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Text,
            log_dir: None,
            retention_runs: 10,
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}
