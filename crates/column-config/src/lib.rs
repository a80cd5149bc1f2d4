// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Column Configuration Loader
//!
//! Loads network configuration documents for the column builder:
//! - TOML or JSON files, picked by extension
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! The builder itself consumes an in-memory mapping and owns no file format;
//! this crate is the tooling layer that gets a document off disk.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use column_config::load_network_document;
//!
//! let document = load_network_document(None, None).expect("Failed to load network config");
//! println!("Sensor input size: {}", document["sensorInputSize"]);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_network_document,
    parse_network_document, DocumentFormat,
};
pub use types::*;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid {format} syntax: {message}")]
    ParseError { format: DocumentFormat, message: String },

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
