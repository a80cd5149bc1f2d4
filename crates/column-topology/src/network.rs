// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
In-memory reference engine.

[`ColumnNetwork`] records registrations and enforces the engine-side rules the
builder relies on: unique region names, known region types, existing link
endpoints, and ports that belong to each region's type. It does not execute
anything; it can, however, report the phase schedule an executor would follow
and check that zero-delay links respect it.
*/

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, trace};

use crate::engine::{EngineError, EngineResult, PortDirection, RegionEngine};
use crate::links::{ports, Link, UNIFORM_LINK};
use crate::namespace::ColumnNamespace;
use crate::regions::region_types;
use crate::types::{Phase, RegionParams};

/// Input and output ports of one region type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortContract {
    pub inputs: BTreeSet<String>,
    pub outputs: BTreeSet<String>,
}

impl PortContract {
    pub fn new(inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|p| p.to_string()).collect(),
            outputs: outputs.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn has_port(&self, direction: PortDirection, port: &str) -> bool {
        match direction {
            PortDirection::Input => self.inputs.contains(port),
            PortDirection::Output => self.outputs.contains(port),
        }
    }
}

/// Region types an engine can instantiate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCatalog {
    types: BTreeMap<String, PortContract>,
}

impl RegionCatalog {
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// The four types a cortical column is made of
    pub fn cortical_column() -> Self {
        let mut catalog = Self::empty();
        catalog.register(
            region_types::RAW_SENSOR,
            PortContract::new(&[], &[ports::DATA_OUT, ports::RESET_OUT]),
        );
        catalog.register(
            region_types::APICAL_TM_PAIR,
            PortContract::new(
                &[
                    ports::BASAL_INPUT,
                    ports::BASAL_GROWTH_CANDIDATES,
                    ports::ACTIVE_COLUMNS,
                    ports::APICAL_INPUT,
                    ports::RESET_IN,
                ],
                &[ports::ACTIVE_CELLS, ports::PREDICTED_ACTIVE_CELLS],
            ),
        );
        catalog.register(
            region_types::APICAL_TM_SEQUENCE,
            PortContract::new(&[ports::ACTIVE_COLUMNS, ports::RESET_IN], &[]),
        );
        catalog.register(
            region_types::COLUMN_POOLER,
            PortContract::new(
                &[
                    ports::FEEDFORWARD_INPUT,
                    ports::FEEDFORWARD_GROWTH_CANDIDATES,
                    ports::RESET_IN,
                ],
                &[ports::FEED_FORWARD_OUTPUT],
            ),
        );
        catalog
    }

    pub fn register(&mut self, type_id: impl Into<String>, contract: PortContract) {
        self.types.insert(type_id.into(), contract);
    }

    pub fn contract(&self, type_id: &str) -> Option<&PortContract> {
        self.types.get(type_id)
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::cortical_column()
    }
}

/// A registered region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRegion {
    pub type_id: String,
    pub params: RegionParams,
    pub phases: Vec<Phase>,
}

/// A registered link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkLink {
    pub kind: String,
    pub params: RegionParams,
    pub source: String,
    pub source_output: String,
    pub dest: String,
    pub dest_input: String,
    pub propagation_delay: u32,
}

impl NetworkLink {
    fn describe(&self) -> String {
        format!(
            "{}/{} -> {}/{}",
            self.source, self.source_output, self.dest, self.dest_input
        )
    }
}

/// Reference [`RegionEngine`] holding one or more columns
#[derive(Debug, Clone, Default, Serialize)]
pub struct ColumnNetwork {
    #[serde(skip)]
    catalog: RegionCatalog,
    regions: BTreeMap<String, NetworkRegion>,
    links: Vec<NetworkLink>,
    profiling_enabled: bool,
}

impl ColumnNetwork {
    /// Network over the cortical column catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: RegionCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn region(&self, name: &str) -> Option<&NetworkRegion> {
        self.regions.get(name)
    }

    pub fn regions(&self) -> &BTreeMap<String, NetworkRegion> {
        &self.regions
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn links(&self) -> &[NetworkLink] {
        &self.links
    }

    pub fn profiling_enabled(&self) -> bool {
        self.profiling_enabled
    }

    /// First phase of a region, if it has been scheduled
    pub fn phase_of(&self, name: &str) -> Option<Phase> {
        self.regions
            .get(name)
            .and_then(|r| r.phases.first().copied())
    }

    /// Region names belonging to one column
    pub fn regions_in_column(&self, namespace: &ColumnNamespace) -> Vec<&str> {
        self.regions
            .keys()
            .filter(|name| namespace.owns(name))
            .map(String::as_str)
            .collect()
    }

    /// Regions grouped by phase, ascending; names sorted within a phase
    ///
    /// Regions registered without a phase are not scheduled.
    pub fn execution_schedule(&self) -> Vec<(Phase, Vec<&str>)> {
        let mut schedule: BTreeMap<Phase, Vec<&str>> = BTreeMap::new();
        for (name, region) in &self.regions {
            for phase in &region.phases {
                schedule.entry(*phase).or_default().push(name.as_str());
            }
        }
        schedule.into_iter().collect()
    }

    /// Check that every zero-delay link runs from an earlier phase to a later one
    ///
    /// Delayed links read the previous step's output and are exempt; they are
    /// what legally closes a feedback cycle.
    ///
    /// # Errors
    ///
    /// `EngineError::CausalityViolation` listing every offending link.
    pub fn check_causality(&self) -> EngineResult<()> {
        let violations: Vec<String> = self
            .links
            .iter()
            .filter(|link| link.propagation_delay == 0)
            .filter(|link| {
                match (self.phase_of(&link.source), self.phase_of(&link.dest)) {
                    (Some(src), Some(dest)) => src >= dest,
                    _ => true,
                }
            })
            .map(NetworkLink::describe)
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(EngineError::CausalityViolation(violations))
        }
    }

    fn checked_port(&self, region: &str, direction: PortDirection, port: &str) -> EngineResult<()> {
        let registered = self
            .regions
            .get(region)
            .ok_or_else(|| EngineError::UnknownRegion(region.to_string()))?;
        let known = self
            .catalog
            .contract(&registered.type_id)
            .is_some_and(|contract| contract.has_port(direction, port));
        if known {
            Ok(())
        } else {
            Err(EngineError::UnknownPort {
                region: region.to_string(),
                type_id: registered.type_id.clone(),
                port: port.to_string(),
                direction,
            })
        }
    }
}

impl RegionEngine for ColumnNetwork {
    fn add_region(
        &mut self,
        name: &str,
        type_id: &str,
        params: &RegionParams,
    ) -> EngineResult<()> {
        if self.regions.contains_key(name) {
            return Err(EngineError::DuplicateRegion(name.to_string()));
        }
        if self.catalog.contract(type_id).is_none() {
            return Err(EngineError::UnknownRegionType(type_id.to_string()));
        }

        trace!(target: "column-topology", "Registering region {} with params {:?}", name, params);
        self.regions.insert(
            name.to_string(),
            NetworkRegion {
                type_id: type_id.to_string(),
                params: params.clone(),
                phases: Vec::new(),
            },
        );
        Ok(())
    }

    fn set_phases(&mut self, name: &str, phases: &[Phase]) -> EngineResult<()> {
        let region = self
            .regions
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownRegion(name.to_string()))?;
        region.phases = phases.to_vec();
        Ok(())
    }

    fn link(
        &mut self,
        link_kind: &str,
        link_params: &RegionParams,
        link: &Link,
    ) -> EngineResult<()> {
        if link_kind != UNIFORM_LINK {
            return Err(EngineError::UnknownLinkKind(link_kind.to_string()));
        }
        self.checked_port(link.source.region.as_str(), PortDirection::Output, link.source.port)?;
        self.checked_port(link.dest.region.as_str(), PortDirection::Input, link.dest.port)?;

        debug!(target: "column-topology", "Registered link {}", link);
        self.links.push(NetworkLink {
            kind: link_kind.to_string(),
            params: link_params.clone(),
            source: link.source.region.as_str().to_string(),
            source_output: link.source.port.to_string(),
            dest: link.dest.region.as_str().to_string(),
            dest_input: link.dest.port.to_string(),
            propagation_delay: link.propagation_delay,
        });
        Ok(())
    }

    fn enable_profiling(&mut self) -> EngineResult<()> {
        self.profiling_enabled = true;
        Ok(())
    }
}
