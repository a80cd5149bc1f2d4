// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for column topology construction.
*/

use crate::engine::EngineError;

/// Scheduling phase of a region (all regions at phase k finish before phase k+1 starts)
pub type Phase = u32;

/// Opaque region parameter block, serialized as-is for the engine
pub type RegionParams = serde_json::Map<String, serde_json::Value>;

/// Result type for topology operations
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors that can abort a column build
///
/// Engine errors are carried through untouched so callers can match on the
/// engine's own taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// A required key is absent from the network configuration
    #[error("Missing required configuration: {key}")]
    Configuration { key: String },

    /// A key is present but its value is unusable
    #[error("Invalid configuration value for {key}: {reason}")]
    Validation { key: String, reason: String },

    /// Phase assignment targeted a region that was never created
    #[error("Phase assignment target {0} was not created")]
    Assignment(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl TopologyError {
    pub(crate) fn missing(key: impl Into<String>) -> Self {
        TopologyError::Configuration { key: key.into() }
    }

    pub(crate) fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        TopologyError::Validation {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
