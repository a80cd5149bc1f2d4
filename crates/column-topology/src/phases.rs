// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Execution phase assignment.
//!
//! Phases are structural: they depend on a region's role, never on config
//! content. Phase 1 is left free for intermediate regions of multi-column
//! compositions, so the table must stay stable across builds. L4 and TM
//! share phase 2 because no link joins them.

use tracing::debug;

use crate::namespace::{ColumnRole, QualifiedName};
use crate::regions::Region;
use crate::types::{Phase, TopologyError, TopologyResult};

/// Role -> phase
pub const PHASE_TABLE: [(ColumnRole, Phase); 5] = [
    (ColumnRole::ExternalInput, 0),
    (ColumnRole::SensorInput, 0),
    (ColumnRole::L4Column, 2),
    (ColumnRole::TmColumn, 2),
    (ColumnRole::L2Column, 3),
];

/// Phase of `role`, or `None` if the table has no entry for it
pub fn phase_for(role: ColumnRole) -> Option<Phase> {
    PHASE_TABLE
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, phase)| *phase)
}

/// Assign a phase to each region in `regions`, following [`PHASE_TABLE`] order
///
/// Optional roles without a region are skipped.
///
/// # Errors
///
/// `TopologyError::Assignment` if a required role has no region.
pub fn assign_phases(regions: &[Region]) -> TopologyResult<Vec<(QualifiedName, Phase)>> {
    let mut assignments = Vec::with_capacity(PHASE_TABLE.len());

    for (role, phase) in PHASE_TABLE {
        match regions.iter().find(|region| region.role() == role) {
            Some(region) => {
                debug!(target: "column-topology", "  Phase {} -> {}", phase, region.name);
                assignments.push((region.name.clone(), phase));
            }
            None if role.is_optional() => {}
            None => return Err(TopologyError::Assignment(role.base_name().to_string())),
        }
    }

    Ok(assignments)
}
