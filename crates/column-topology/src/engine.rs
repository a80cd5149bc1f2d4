// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Region engine capability.

The engine owns region execution. This crate only needs it to accept region
registrations, phase assignments, and links; everything else about the
engine (how regions compute, how phases are scheduled) stays on its side of
the [`RegionEngine`] trait.
*/

use std::fmt;

use parking_lot::Mutex;
use serde::Serialize;

use crate::links::Link;
use crate::types::{Phase, RegionParams};

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Direction of a region port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// Errors raised by a region engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Region {0} already exists")]
    DuplicateRegion(String),

    #[error("Unknown region type: {0}")]
    UnknownRegionType(String),

    #[error("Region {0} does not exist")]
    UnknownRegion(String),

    #[error("Region {region} ({type_id}) has no {direction} port named {port}")]
    UnknownPort {
        region: String,
        type_id: String,
        port: String,
        direction: PortDirection,
    },

    #[error("Unsupported link kind: {0}")]
    UnknownLinkKind(String),

    #[error("Profiling is not available: {0}")]
    ProfilingUnavailable(String),

    #[error("Zero-delay links violate phase ordering: {}", .0.join(", "))]
    CausalityViolation(Vec<String>),

    #[error("Engine error: {0}")]
    Backend(String),
}

/// Registration surface of a region-execution engine
///
/// Object safe: the builder drives engines through `&mut dyn RegionEngine`.
pub trait RegionEngine {
    /// Register a region. Duplicate names and unknown types are errors.
    fn add_region(&mut self, name: &str, type_id: &str, params: &RegionParams)
        -> EngineResult<()>;

    /// Set the execution phases of an already registered region
    fn set_phases(&mut self, name: &str, phases: &[Phase]) -> EngineResult<()>;

    /// Register a directed port-to-port link
    fn link(&mut self, link_kind: &str, link_params: &RegionParams, link: &Link)
        -> EngineResult<()>;

    /// Toggle instrumentation. Engines without profiling support say so.
    fn enable_profiling(&mut self) -> EngineResult<()> {
        Err(EngineError::ProfilingUnavailable(
            "engine does not support profiling".to_string(),
        ))
    }
}

/// Shared destination: each registration locks for its own duration only, so
/// several columns can be built into one engine from different threads.
impl<E: RegionEngine + ?Sized> RegionEngine for &Mutex<E> {
    fn add_region(
        &mut self,
        name: &str,
        type_id: &str,
        params: &RegionParams,
    ) -> EngineResult<()> {
        self.lock().add_region(name, type_id, params)
    }

    fn set_phases(&mut self, name: &str, phases: &[Phase]) -> EngineResult<()> {
        self.lock().set_phases(name, phases)
    }

    fn link(
        &mut self,
        link_kind: &str,
        link_params: &RegionParams,
        link: &Link,
    ) -> EngineResult<()> {
        self.lock().link(link_kind, link_params, link)
    }

    fn enable_profiling(&mut self) -> EngineResult<()> {
        self.lock().enable_profiling()
    }
}
