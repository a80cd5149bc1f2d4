// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-column-topology` or `--debug-all`, plus the
//! `COLUMN_DEBUG` environment variable.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable listing crates to debug (comma-separated, or `all`)
pub const DEBUG_ENV: &str = "COLUMN_DEBUG";

/// Crates with debug logging switched on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`; `--debug-all`
    /// enables every known crate. Other arguments are ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            match arg.strip_prefix("--debug-") {
                Some("all") => flags.enable_all(),
                Some(crate_name) if !crate_name.is_empty() => {
                    flags.enabled_crates.insert(crate_name.to_string());
                }
                _ => {}
            }
        }
        flags
    }

    /// Merge crates named in a `COLUMN_DEBUG`-style value
    pub fn merge_env_value(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        for crate_name in value.split(',').map(str::trim) {
            if !crate_name.is_empty() {
                self.enabled_crates.insert(crate_name.to_string());
            }
        }
    }

    fn enable_all(&mut self) {
        self.enabled_crates
            .extend(KNOWN_CRATES.iter().map(|c| c.to_string()));
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `DEBUG` for flagged crates, `INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// `EnvFilter` directive string: flagged crates at debug, everything else at `default_level`
    ///
    /// Example: `"column-topology=debug,info"`
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name))
            .collect();
        filters.push(default_level.to_string());
        filters.join(",")
    }
}

/// Parse debug flags from the process arguments and `COLUMN_DEBUG`
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(value) = env::var(DEBUG_ENV) {
        flags.merge_env_value(&value);
    }
    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  {}={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  {}=all                            Enable debug for all crates
"#,
        KNOWN_CRATES.join(", "),
        DEBUG_ENV,
        DEBUG_ENV
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-column-topology".to_string()]);
        assert!(flags.is_enabled("column-topology"));
        assert!(!flags.is_enabled("column-config"));
    }

    #[test]
    fn test_unrelated_args_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "network.toml".to_string(),
            "--columns".to_string(),
            "--debug-".to_string(),
        ]);
        assert!(!flags.any_enabled());
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_env_value_merge() {
        let mut flags = CrateDebugFlags::default();
        flags.merge_env_value(" column-config , ,column-topology");
        assert!(flags.is_enabled("column-config"));
        assert!(flags.is_enabled("column-topology"));
        assert_eq!(flags.enabled_crates.len(), 2);
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-column-topology".to_string()]);
        assert_eq!(flags.to_filter_string("warn"), "column-topology=debug,warn");
        assert_eq!(CrateDebugFlags::default().to_filter_string("info"), "info");
    }

    #[test]
    fn test_log_level() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-column-config".to_string()]);
        assert_eq!(flags.log_level("column-config"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("column-topology"), tracing::Level::INFO);
    }
}
