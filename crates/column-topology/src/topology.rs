// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The built artifact of one column.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::links::Link;
use crate::namespace::{ColumnNamespace, ColumnRole};
use crate::profiling::ProfilingStatus;
use crate::regions::Region;
use crate::types::Phase;

/// Regions, phases, and links registered by one build call
///
/// Owned by the caller; the builder keeps nothing once it returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTopology {
    pub namespace: ColumnNamespace,
    /// In registration order
    pub regions: Vec<Region>,
    /// Qualified region name -> phase
    pub phases: BTreeMap<String, Phase>,
    /// In registration order
    pub links: Vec<Link>,
    pub profiling: ProfilingStatus,
}

impl ColumnTopology {
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn region_for(&self, role: ColumnRole) -> Option<&Region> {
        self.regions.iter().find(|r| r.role() == role)
    }

    pub fn region_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.regions.iter().map(|r| r.name.as_str())
    }

    pub fn phase_of(&self, name: &str) -> Option<Phase> {
        self.phases.get(name).copied()
    }

    pub fn phase_for(&self, role: ColumnRole) -> Option<Phase> {
        self.phase_of(self.namespace.qualify(role).as_str())
    }

    pub fn links_from<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.source.region == name)
    }

    pub fn links_into<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.dest.region == name)
    }

    pub fn delayed_links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().filter(|l| l.is_delayed())
    }
}
