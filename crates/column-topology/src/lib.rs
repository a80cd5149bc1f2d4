// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Column Topology

Static wiring of one cortical column: named processing regions, their
execution phases, and the port-to-port links between them.

A column consists of:
- `externalInput` (optional) and `sensorInput` input adapters
- `L4Column`, the first layer, fed by both inputs and by L2 feedback
- `TMColumn`, a sequence memory driven by the sensor signal
- `L2Column`, the pooling layer, fed by L4

The L2 -> L4 feedback link is the only cycle and carries a one-step delay.
The sensor's reset pulse fans out to every stateful region.

## Architecture

- [`config`]: network configuration and validation
- [`params`]: L4 parameter derivation
- [`regions`]: region factory
- [`phases`]: structural phase table
- [`links`]: the column circuit
- [`builder`]: orchestration into a [`RegionEngine`]
- [`network`]: in-memory reference engine

Execution of regions is the engine's business; this crate only builds.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builder;
pub mod config;
pub mod engine;
pub mod links;
pub mod namespace;
pub mod network;
pub mod params;
pub mod phases;
pub mod profiling;
pub mod regions;
pub mod topology;
pub mod types;

pub use builder::TopologyBuilder;
pub use config::{NetworkConfig, ValidatedConfig};
pub use engine::{EngineError, EngineResult, PortDirection, RegionEngine};
pub use links::{Endpoint, Link, FEEDBACK_DELAY, UNIFORM_LINK};
pub use namespace::{ColumnNamespace, ColumnRole, QualifiedName};
pub use network::{ColumnNetwork, NetworkLink, NetworkRegion, PortContract, RegionCatalog};
pub use params::{derive_l4_params, APICAL_INPUT_WIDTH, BASAL_INPUT_WIDTH};
pub use phases::{assign_phases, phase_for, PHASE_TABLE};
pub use profiling::{EngineProfiling, ProfilingHook, ProfilingStatus};
pub use regions::{ColumnRegions, InputAdapterKind, Region, RegionFactory};
pub use topology::ColumnTopology;
pub use types::{Phase, RegionParams, TopologyError, TopologyResult};
