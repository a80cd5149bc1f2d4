// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Link wiring.

The column circuit is a fixed table of role/port pairs. Wiring substitutes the
column's namespace into every endpoint and drops any wire whose region is
absent, which only ever happens for the external input.

```text
                     L2Column   <-----------------+
                       ^  |                       |
                       |  | (delay 1)             |
                       |  v                       |
     +------------->  L4Column  <-----------------+
     |                   ^                        |
     |                   |        TMColumn <------+
     |                   |           ^            |
     |                   |           |            |
externalInput        sensorInput ----+          reset
```
*/

use std::fmt;

use serde::Serialize;

use crate::namespace::{ColumnNamespace, ColumnRole, QualifiedName};
use crate::regions::ColumnRegions;

/// Port names of the region type catalog
pub mod ports {
    pub const DATA_OUT: &str = "dataOut";
    pub const RESET_OUT: &str = "resetOut";
    pub const RESET_IN: &str = "resetIn";

    pub const BASAL_INPUT: &str = "basalInput";
    pub const BASAL_GROWTH_CANDIDATES: &str = "basalGrowthCandidates";
    pub const ACTIVE_COLUMNS: &str = "activeColumns";
    pub const APICAL_INPUT: &str = "apicalInput";
    pub const ACTIVE_CELLS: &str = "activeCells";
    pub const PREDICTED_ACTIVE_CELLS: &str = "predictedActiveCells";

    pub const FEEDFORWARD_INPUT: &str = "feedforwardInput";
    pub const FEEDFORWARD_GROWTH_CANDIDATES: &str = "feedforwardGrowthCandidates";
    pub const FEED_FORWARD_OUTPUT: &str = "feedForwardOutput";
}

/// Link kind passed to the engine for every column link
pub const UNIFORM_LINK: &str = "UniformLink";

/// Delay on the L2 -> L4 feedback link
pub const FEEDBACK_DELAY: u32 = 1;

/// One side of a link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Endpoint {
    pub region: QualifiedName,
    pub port: &'static str,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.region, self.port)
    }
}

/// Directed port-to-port edge
///
/// `propagation_delay == 0`: destination sees the source's current output.
/// `propagation_delay == 1`: destination sees the previous step's output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    pub source: Endpoint,
    pub dest: Endpoint,
    pub propagation_delay: u32,
}

impl Link {
    pub fn is_delayed(&self) -> bool {
        self.propagation_delay > 0
    }

    pub fn references(&self, region: &str) -> bool {
        self.source.region == region || self.dest.region == region
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (delay {})",
            self.source, self.dest, self.propagation_delay
        )
    }
}

struct Wire {
    source: (ColumnRole, &'static str),
    dest: (ColumnRole, &'static str),
    delay: u32,
}

const fn wire(
    source: (ColumnRole, &'static str),
    dest: (ColumnRole, &'static str),
    delay: u32,
) -> Wire {
    Wire {
        source,
        dest,
        delay,
    }
}

/// The column circuit, in registration order
const CIRCUIT: [Wire; 10] = [
    // Inputs into L4
    wire(
        (ColumnRole::ExternalInput, ports::DATA_OUT),
        (ColumnRole::L4Column, ports::BASAL_INPUT),
        0,
    ),
    wire(
        (ColumnRole::ExternalInput, ports::DATA_OUT),
        (ColumnRole::L4Column, ports::BASAL_GROWTH_CANDIDATES),
        0,
    ),
    wire(
        (ColumnRole::SensorInput, ports::DATA_OUT),
        (ColumnRole::L4Column, ports::ACTIVE_COLUMNS),
        0,
    ),
    // Sensor into TM
    wire(
        (ColumnRole::SensorInput, ports::DATA_OUT),
        (ColumnRole::TmColumn, ports::ACTIVE_COLUMNS),
        0,
    ),
    // L4 into L2
    wire(
        (ColumnRole::L4Column, ports::ACTIVE_CELLS),
        (ColumnRole::L2Column, ports::FEEDFORWARD_INPUT),
        0,
    ),
    wire(
        (ColumnRole::L4Column, ports::PREDICTED_ACTIVE_CELLS),
        (ColumnRole::L2Column, ports::FEEDFORWARD_GROWTH_CANDIDATES),
        0,
    ),
    // L2 feedback, the only cycle
    wire(
        (ColumnRole::L2Column, ports::FEED_FORWARD_OUTPUT),
        (ColumnRole::L4Column, ports::APICAL_INPUT),
        FEEDBACK_DELAY,
    ),
    // Reset fan-out
    wire(
        (ColumnRole::SensorInput, ports::RESET_OUT),
        (ColumnRole::L2Column, ports::RESET_IN),
        0,
    ),
    wire(
        (ColumnRole::SensorInput, ports::RESET_OUT),
        (ColumnRole::TmColumn, ports::RESET_IN),
        0,
    ),
    wire(
        (ColumnRole::SensorInput, ports::RESET_OUT),
        (ColumnRole::L4Column, ports::RESET_IN),
        0,
    ),
];

/// Links of one column, restricted to the regions that exist
pub fn wire_links(namespace: &ColumnNamespace, regions: &ColumnRegions) -> Vec<Link> {
    CIRCUIT
        .iter()
        .filter(|w| regions.get(w.source.0).is_some() && regions.get(w.dest.0).is_some())
        .map(|w| Link {
            source: Endpoint {
                region: namespace.qualify(w.source.0),
                port: w.source.1,
            },
            dest: Endpoint {
                region: namespace.qualify(w.dest.0),
                port: w.dest.1,
            },
            propagation_delay: w.delay,
        })
        .collect()
}
