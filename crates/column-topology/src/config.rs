// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Network configuration and its validation.

A [`NetworkConfig`] is the caller's nested mapping. The builder only ever
borrows it; validation produces a [`ValidatedConfig`] view whose sizes are
typed and whose region parameter blocks are known to be mappings.
*/

use std::num::NonZeroU64;

use serde_json::Value;

use crate::types::{RegionParams, TopologyError, TopologyResult};

/// Configuration keys
pub mod keys {
    pub const SENSOR_INPUT_SIZE: &str = "sensorInputSize";
    pub const EXTERNAL_INPUT_SIZE: &str = "externalInputSize";
    pub const L4_PARAMS: &str = "L4Params";
    pub const L2_PARAMS: &str = "L2Params";
    pub const TM_PARAMS: &str = "TMParams";
    pub const CELL_COUNT: &str = "cellCount";

    /// Dotted path of the L2 cell count
    pub const L2_CELL_COUNT: &str = "L2Params.cellCount";

    /// Name used in errors about the document itself
    pub const ROOT: &str = "networkConfig";
}

/// Caller-owned network configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    document: Value,
}

impl NetworkConfig {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    pub fn as_value(&self) -> &Value {
        &self.document
    }

    pub fn into_value(self) -> Value {
        self.document
    }

    /// Check required keys, then value semantics
    ///
    /// Presence is checked for every required key before any value is
    /// interpreted, in the order `sensorInputSize`, `externalInputSize`,
    /// `L4Params`, `L2Params`, `L2Params.cellCount`, `TMParams`.
    ///
    /// # Errors
    ///
    /// - `TopologyError::Configuration` naming the dotted path of the first missing key
    /// - `TopologyError::Validation` for present but unusable values
    pub fn validate(&self) -> TopologyResult<ValidatedConfig<'_>> {
        let root = self
            .document
            .as_object()
            .ok_or_else(|| TopologyError::invalid(keys::ROOT, "expected a mapping"))?;

        let sensor = require(root, keys::SENSOR_INPUT_SIZE, keys::SENSOR_INPUT_SIZE)?;
        let external = require(root, keys::EXTERNAL_INPUT_SIZE, keys::EXTERNAL_INPUT_SIZE)?;
        let l4 = require(root, keys::L4_PARAMS, keys::L4_PARAMS)?;
        let l2 = require(root, keys::L2_PARAMS, keys::L2_PARAMS)?;
        let l2 = as_params(l2, keys::L2_PARAMS)?;
        let cell_count = require(l2, keys::CELL_COUNT, keys::L2_CELL_COUNT)?;
        let tm = require(root, keys::TM_PARAMS, keys::TM_PARAMS)?;

        let sensor_input_size = positive(integer(sensor, keys::SENSOR_INPUT_SIZE)?)
            .ok_or_else(|| {
                TopologyError::invalid(keys::SENSOR_INPUT_SIZE, format!("must be positive (got {})", sensor))
            })?;
        let external_input_size = positive(integer(external, keys::EXTERNAL_INPUT_SIZE)?);

        Ok(ValidatedConfig {
            sensor_input_size,
            external_input_size,
            external_input_value: external,
            l2_cell_count: cell_count,
            l4_params: as_params(l4, keys::L4_PARAMS)?,
            l2_params: l2,
            tm_params: as_params(tm, keys::TM_PARAMS)?,
        })
    }
}

impl From<Value> for NetworkConfig {
    fn from(document: Value) -> Self {
        Self::new(document)
    }
}

/// Borrowed, typed view of a valid [`NetworkConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig<'a> {
    pub sensor_input_size: NonZeroU64,
    /// `None` when the external input is disabled (`externalInputSize <= 0`)
    pub external_input_size: Option<NonZeroU64>,
    /// `externalInputSize` as written by the caller
    pub external_input_value: &'a Value,
    /// `L2Params.cellCount` as written by the caller; only its presence is checked
    pub l2_cell_count: &'a Value,
    pub l4_params: &'a RegionParams,
    pub l2_params: &'a RegionParams,
    pub tm_params: &'a RegionParams,
}

fn require<'a>(map: &'a RegionParams, key: &str, path: &str) -> TopologyResult<&'a Value> {
    map.get(key).ok_or_else(|| TopologyError::missing(path))
}

fn as_params<'a>(value: &'a Value, path: &str) -> TopologyResult<&'a RegionParams> {
    value
        .as_object()
        .ok_or_else(|| TopologyError::invalid(path, "expected a mapping"))
}

fn integer(value: &Value, path: &str) -> TopologyResult<i128> {
    value
        .as_u64()
        .map(i128::from)
        .or_else(|| value.as_i64().map(i128::from))
        .ok_or_else(|| TopologyError::invalid(path, format!("expected an integer, got {}", value)))
}

fn positive(n: i128) -> Option<NonZeroU64> {
    u64::try_from(n).ok().and_then(NonZeroU64::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_config() -> Value {
        json!({
            "externalInputSize": 1024,
            "sensorInputSize": 1024,
            "L4Params": {"columnCount": 1024, "cellsPerColumn": 16},
            "L2Params": {"cellCount": 4096, "sdrSize": 40},
            "TMParams": {"columnCount": 1024},
        })
    }

    fn without(mut doc: Value, path: &[&str]) -> Value {
        let (last, parents) = path.split_last().unwrap();
        let mut cursor = &mut doc;
        for key in parents {
            cursor = cursor.get_mut(*key).unwrap();
        }
        cursor.as_object_mut().unwrap().remove(*last);
        doc
    }

    #[test]
    fn test_valid_config() {
        let config = NetworkConfig::new(base_config());
        let validated = config.validate().unwrap();
        assert_eq!(validated.sensor_input_size.get(), 1024);
        assert_eq!(validated.external_input_size.map(NonZeroU64::get), Some(1024));
        assert_eq!(validated.l2_cell_count, &json!(4096));
        assert_eq!(validated.tm_params.get("columnCount"), Some(&json!(1024)));
    }

    #[test]
    fn test_zero_external_input_is_disabled_not_invalid() {
        let mut doc = base_config();
        doc["externalInputSize"] = json!(0);
        let config = NetworkConfig::new(doc);
        let validated = config.validate().unwrap();
        assert_eq!(validated.external_input_size, None);
        assert_eq!(validated.external_input_value, &json!(0));
    }

    #[test]
    fn test_negative_external_input_is_disabled() {
        let mut doc = base_config();
        doc["externalInputSize"] = json!(-3);
        let config = NetworkConfig::new(doc);
        let validated = config.validate().unwrap();
        assert_eq!(validated.external_input_size, None);
        assert_eq!(validated.external_input_value, &json!(-3));
    }

    #[test]
    fn test_cell_count_is_only_checked_for_presence() {
        for cell_count in [json!(-1), json!(5_000_000_000u64), json!(4096.0), json!("wide")] {
            let mut doc = base_config();
            doc["L2Params"]["cellCount"] = cell_count.clone();
            let config = NetworkConfig::new(doc);
            let validated = config.validate().unwrap();
            assert_eq!(validated.l2_cell_count, &cell_count);
        }
    }

    #[test]
    fn test_sizes_beyond_i64_are_integers() {
        let mut doc = base_config();
        doc["sensorInputSize"] = json!(u64::MAX);
        doc["externalInputSize"] = json!(u64::MAX);
        let config = NetworkConfig::new(doc);
        let validated = config.validate().unwrap();
        assert_eq!(validated.sensor_input_size.get(), u64::MAX);
        assert_eq!(validated.external_input_size.map(NonZeroU64::get), Some(u64::MAX));
    }

    #[test]
    fn test_each_missing_key_is_reported_by_path() {
        let cases: [&[&str]; 6] = [
            &["sensorInputSize"],
            &["externalInputSize"],
            &["L4Params"],
            &["L2Params"],
            &["L2Params", "cellCount"],
            &["TMParams"],
        ];
        for path in cases {
            let config = NetworkConfig::new(without(base_config(), path));
            let err = config.validate().unwrap_err();
            assert_eq!(
                err,
                TopologyError::Configuration {
                    key: path.join(".")
                }
            );
        }
    }

    #[test]
    fn test_missing_keys_win_over_bad_values() {
        let mut doc = without(base_config(), &["TMParams"]);
        doc["sensorInputSize"] = json!(0);
        let err = NetworkConfig::new(doc).validate().unwrap_err();
        assert!(matches!(err, TopologyError::Configuration { key } if key == "TMParams"));
    }

    #[test]
    fn test_non_positive_sensor_size_fails_validation() {
        for bad in [json!(0), json!(-5)] {
            let mut doc = base_config();
            doc["sensorInputSize"] = bad;
            let err = NetworkConfig::new(doc).validate().unwrap_err();
            assert!(
                matches!(&err, TopologyError::Validation { key, .. } if key == "sensorInputSize"),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_non_integer_sizes_fail_validation() {
        let mut doc = base_config();
        doc["externalInputSize"] = json!("1024");
        let err = NetworkConfig::new(doc).validate().unwrap_err();
        assert!(matches!(err, TopologyError::Validation { key, .. } if key == "externalInputSize"));

        let mut doc = base_config();
        doc["sensorInputSize"] = json!(40.5);
        let err = NetworkConfig::new(doc).validate().unwrap_err();
        assert!(matches!(err, TopologyError::Validation { key, .. } if key == "sensorInputSize"));
    }

    #[test]
    fn test_param_blocks_must_be_mappings() {
        let mut doc = base_config();
        doc["L2Params"] = json!([4096]);
        let err = NetworkConfig::new(doc).validate().unwrap_err();
        assert!(matches!(err, TopologyError::Validation { key, .. } if key == "L2Params"));

        let mut doc = base_config();
        doc["TMParams"] = json!(null);
        let err = NetworkConfig::new(doc).validate().unwrap_err();
        assert!(matches!(err, TopologyError::Validation { key, .. } if key == "TMParams"));
    }

    #[test]
    fn test_document_must_be_a_mapping() {
        let err = NetworkConfig::new(json!([1, 2, 3])).validate().unwrap_err();
        assert!(matches!(err, TopologyError::Validation { key, .. } if key == keys::ROOT));
    }

    #[test]
    fn test_extra_keys_are_allowed() {
        let mut doc = base_config();
        doc["tool"] = json!({"columns": 3});
        assert!(NetworkConfig::new(doc).validate().is_ok());
    }
}
