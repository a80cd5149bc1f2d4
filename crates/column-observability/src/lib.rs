// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # column-observability
//!
//! Logging setup for cortical column tooling, with per-crate debug flags.
//!
//! ## Features
//! - `file-logging`: rolling JSON log files in a timestamped run directory

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Crate names (log targets) that accept debug flags
pub const KNOWN_CRATES: &[&str] = &["column-topology", "column-config", "cortical-column"];
