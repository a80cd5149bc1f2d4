// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Cortical Column
//!
//! Static wiring of a multi-region cortical column: regions, execution phases,
//! and the delayed L2 -> L4 feedback link. This crate re-exports the workspace
//! members and glues configuration documents to the topology builder.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cortical_column::prelude::*;
//! use serde_json::json;
//!
//! let config = NetworkConfig::new(json!({
//!     "sensorInputSize": 1024,
//!     "externalInputSize": 0,
//!     "L4Params": {},
//!     "L2Params": {"cellCount": 4096},
//!     "TMParams": {},
//! }));
//!
//! let mut network = ColumnNetwork::new();
//! let topology = TopologyBuilder::new().build(&mut network, &config, "_A")?;
//! assert_eq!(topology.phase_of("L2Column_A"), Some(3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crates
//!
//! - **column-topology**: validation, parameter derivation, regions, phases, links
//! - **column-config**: TOML/JSON documents with environment and CLI overrides
//! - **column-observability**: logging init and per-crate debug flags
//!
//! ## License
//!
//! Apache-2.0

use serde_json::Value;
use tracing::info;

pub use column_config as config;
pub use column_observability as observability;
pub use column_topology as topology;

use column_config::ToolSettings;
use column_observability::{LogFormat, LoggingConfig};
use column_topology::{ColumnNetwork, ColumnTopology, NetworkConfig, TopologyBuilder, TopologyResult};

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use column_topology::{
        ColumnNamespace, ColumnNetwork, ColumnRole, ColumnTopology, NetworkConfig, RegionEngine,
        TopologyBuilder, TopologyError, TopologyResult,
    };
}

/// Columns built from one document, together with the network holding them
#[derive(Debug)]
pub struct BuiltNetwork {
    pub network: ColumnNetwork,
    pub columns: Vec<ColumnTopology>,
}

/// Build the columns described by a network document and its tool settings
///
/// One column uses `settings.suffix`; several columns use indexed suffixes
/// (`_0`, `_1`, ...).
///
/// # Errors
///
/// Any builder error; the partially filled network is dropped.
pub fn build_network(document: Value, settings: &ToolSettings) -> TopologyResult<BuiltNetwork> {
    let config = NetworkConfig::new(document);
    let builder = if settings.profiling {
        TopologyBuilder::new().with_engine_profiling()
    } else {
        TopologyBuilder::new()
    };

    let mut network = ColumnNetwork::new();
    let columns = if settings.columns == 1 {
        vec![builder.build(&mut network, &config, &settings.suffix)?]
    } else {
        builder.build_columns(&mut network, &config, settings.columns)?
    };

    info!(
        target: "cortical-column",
        "Built {} column(s) with {} regions and {} links",
        columns.len(),
        network.region_count(),
        network.links().len()
    );

    Ok(BuiltNetwork { network, columns })
}

/// Logging configuration matching the tool settings
///
/// Unknown formats fall back to text; `ToolSettings::validate` rejects them earlier.
pub fn logging_config(settings: &ToolSettings) -> LoggingConfig {
    LoggingConfig {
        level: settings.log_level.clone(),
        format: settings.log_format.parse().unwrap_or(LogFormat::Text),
        ..LoggingConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "sensorInputSize": 64,
            "externalInputSize": 16,
            "L4Params": {"columnCount": 64},
            "L2Params": {"cellCount": 256},
            "TMParams": {"columnCount": 64},
        })
    }

    #[test]
    fn test_single_column_uses_suffix() {
        let settings = ToolSettings {
            suffix: "_left".to_string(),
            ..ToolSettings::default()
        };
        let built = build_network(document(), &settings).unwrap();

        assert_eq!(built.columns.len(), 1);
        assert!(built.network.region("L4Column_left").is_some());
        assert!(built.network.profiling_enabled());
    }

    #[test]
    fn test_many_columns_use_indexed_suffixes() {
        let settings = ToolSettings {
            columns: 3,
            suffix: "_ignored".to_string(),
            profiling: false,
            ..ToolSettings::default()
        };
        let built = build_network(document(), &settings).unwrap();

        assert_eq!(built.columns.len(), 3);
        assert_eq!(built.network.region_count(), 15);
        assert!(built.network.region("sensorInput_2").is_some());
        assert!(!built.network.profiling_enabled());
    }

    #[test]
    fn test_logging_config_from_settings() {
        let settings = ToolSettings {
            log_level: "debug".to_string(),
            log_format: "json".to_string(),
            ..ToolSettings::default()
        };
        let logging = logging_config(&settings);
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
    }
}
