// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Column construction.

A build runs in fixed stages:

1. **Validation**: required keys, then value semantics
2. **Derivation**: cross-region L4 widths into a private parameter copy
3. **Region creation**: optional external input, sensor input, L4, TM, L2
4. **Phase assignment**: structural phase per role
5. **Wiring**: the fixed ten-link circuit, minus absent regions
6. **Profiling**: the optional hook, best effort

Stages 1-5 are planned in full before the engine sees a single
registration, so configuration problems never leave a half-built column
behind. Engine errors stop the build at the failing call.
*/

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, error, info, warn};

use crate::config::NetworkConfig;
use crate::engine::RegionEngine;
use crate::links::{wire_links, Link, UNIFORM_LINK};
use crate::namespace::{ColumnNamespace, QualifiedName};
use crate::params::derive_l4_params;
use crate::phases::assign_phases;
use crate::profiling::{EngineProfiling, ProfilingHook, ProfilingStatus};
use crate::regions::{Region, RegionFactory};
use crate::topology::ColumnTopology;
use crate::types::{Phase, RegionParams, TopologyResult};

/// Builds cortical columns into a region engine
///
/// Stateless between calls: identical config and namespace always produce an
/// identical [`ColumnTopology`].
#[derive(Default)]
pub struct TopologyBuilder {
    profiler: Option<Box<dyn ProfilingHook>>,
}

impl fmt::Debug for TopologyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopologyBuilder")
            .field("profiler", &self.profiler.is_some())
            .finish()
    }
}

/// Everything a build will register, computed before touching the engine
struct ColumnPlan {
    regions: Vec<Region>,
    phases: Vec<(QualifiedName, Phase)>,
    links: Vec<Link>,
}

impl TopologyBuilder {
    /// Builder without profiling
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiler(mut self, profiler: Box<dyn ProfilingHook>) -> Self {
        self.profiler = Some(profiler);
        self
    }

    /// Builder that asks the engine itself to enable profiling
    pub fn with_engine_profiling(self) -> Self {
        self.with_profiler(Box::new(EngineProfiling))
    }

    pub fn has_profiler(&self) -> bool {
        self.profiler.is_some()
    }

    /// Build one column whose regions are suffixed with `suffix`
    pub fn build(
        &self,
        engine: &mut dyn RegionEngine,
        config: &NetworkConfig,
        suffix: &str,
    ) -> TopologyResult<ColumnTopology> {
        self.build_column(engine, config, &ColumnNamespace::new(suffix))
    }

    /// Build one column inside `namespace`
    ///
    /// # Errors
    ///
    /// Configuration, validation, and assignment errors are raised before
    /// any engine call. Engine errors are returned as the engine reported them.
    pub fn build_column(
        &self,
        engine: &mut dyn RegionEngine,
        config: &NetworkConfig,
        namespace: &ColumnNamespace,
    ) -> TopologyResult<ColumnTopology> {
        info!(target: "column-topology", "🧬 Building cortical column {}", namespace);

        let plan = plan_column(config, namespace).map_err(|e| {
            error!(target: "column-topology", "❌ Column {} rejected: {}", namespace, e);
            e
        })?;

        commit(engine, &plan).map_err(|e| {
            error!(target: "column-topology", "❌ Engine rejected column {}: {}", namespace, e);
            e
        })?;

        let profiling = self.enable_profiling(engine);

        info!(
            target: "column-topology",
            "  ✅ Column {} ready: {} regions, {} links",
            namespace,
            plan.regions.len(),
            plan.links.len()
        );

        Ok(ColumnTopology {
            namespace: namespace.clone(),
            phases: plan
                .phases
                .into_iter()
                .map(|(name, phase)| (name.as_str().to_string(), phase))
                .collect::<BTreeMap<_, _>>(),
            regions: plan.regions,
            links: plan.links,
            profiling,
        })
    }

    /// Build `count` columns with suffixes `_0` through `_{count-1}`
    ///
    /// Stops at the first failing column; columns already built stay in the engine.
    pub fn build_columns(
        &self,
        engine: &mut dyn RegionEngine,
        config: &NetworkConfig,
        count: usize,
    ) -> TopologyResult<Vec<ColumnTopology>> {
        info!(target: "column-topology", "🧬 Building {} cortical columns", count);
        (0..count)
            .map(|i| self.build_column(engine, config, &ColumnNamespace::indexed(i)))
            .collect()
    }

    fn enable_profiling(&self, engine: &mut dyn RegionEngine) -> ProfilingStatus {
        let Some(profiler) = &self.profiler else {
            debug!(target: "column-topology", "  Profiling not requested");
            return ProfilingStatus::NotRequested;
        };
        match profiler.enable(engine) {
            Ok(()) => {
                debug!(target: "column-topology", "  Profiling enabled");
                ProfilingStatus::Enabled
            }
            Err(e) => {
                warn!(target: "column-topology", "⚠️ Profiling not enabled: {}", e);
                ProfilingStatus::Failed(e.to_string())
            }
        }
    }
}

fn plan_column(config: &NetworkConfig, namespace: &ColumnNamespace) -> TopologyResult<ColumnPlan> {
    let validated = config.validate()?;
    let l4_params = derive_l4_params(&validated);

    let column = RegionFactory::new(namespace).create_column(&validated, l4_params);
    let links = wire_links(namespace, &column);
    let regions = column.into_vec();
    let phases = assign_phases(&regions)?;

    Ok(ColumnPlan {
        regions,
        phases,
        links,
    })
}

fn commit(engine: &mut dyn RegionEngine, plan: &ColumnPlan) -> TopologyResult<()> {
    for region in &plan.regions {
        debug!(target: "column-topology", "  Adding region {} ({})", region.name, region.type_id);
        engine.add_region(region.name.as_str(), &region.type_id, &region.params)?;
    }

    for (name, phase) in &plan.phases {
        engine.set_phases(name.as_str(), &[*phase])?;
    }

    let link_params = RegionParams::new();
    for link in &plan.links {
        debug!(target: "column-topology", "  Linking {}", link);
        engine.link(UNIFORM_LINK, &link_params, link)?;
    }

    Ok(())
}
