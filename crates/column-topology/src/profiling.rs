// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Optional profiling collaborator.
//!
//! Profiling is best effort. A hook that fails leaves the build intact and
//! shows up as [`ProfilingStatus::Failed`] on the built topology.

use serde::Serialize;

use crate::engine::{EngineResult, RegionEngine};

/// Turns on instrumentation for a freshly wired engine
pub trait ProfilingHook: Send + Sync {
    fn enable(&self, engine: &mut dyn RegionEngine) -> EngineResult<()>;
}

/// Delegates to [`RegionEngine::enable_profiling`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineProfiling;

impl ProfilingHook for EngineProfiling {
    fn enable(&self, engine: &mut dyn RegionEngine) -> EngineResult<()> {
        engine.enable_profiling()
    }
}

/// What happened to profiling during a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProfilingStatus {
    /// The builder had no profiling hook
    NotRequested,
    Enabled,
    Failed(String),
}

impl ProfilingStatus {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ProfilingStatus::Enabled)
    }
}
