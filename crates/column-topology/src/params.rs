// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! L4 parameter derivation.
//!
//! The first layer's input widths are owned by other regions: basal width by
//! the external input, apical width by the L2 cell count. They are resolved
//! once here, into a private copy of `L4Params`.

use tracing::trace;

use crate::config::ValidatedConfig;
use crate::types::RegionParams;

pub const BASAL_INPUT_WIDTH: &str = "basalInputWidth";
pub const APICAL_INPUT_WIDTH: &str = "apicalInputWidth";

/// Copy `L4Params` and add the two cross-region widths
///
/// Both widths are copied verbatim from the config, so a disabled external
/// input keeps whatever non-positive size the caller wrote. Existing
/// `basalInputWidth`/`apicalInputWidth` entries are overwritten.
pub fn derive_l4_params(config: &ValidatedConfig<'_>) -> RegionParams {
    let mut params = config.l4_params.clone();
    params.insert(
        BASAL_INPUT_WIDTH.to_string(),
        config.external_input_value.clone(),
    );
    params.insert(
        APICAL_INPUT_WIDTH.to_string(),
        config.l2_cell_count.clone(),
    );
    trace!(target: "column-topology", "Derived L4 params: {:?}", params);
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use serde_json::json;

    #[test]
    fn test_widths_come_from_sibling_fields() {
        let config = NetworkConfig::new(json!({
            "externalInputSize": 512,
            "sensorInputSize": 1024,
            "L4Params": {"cellsPerColumn": 16, "basalInputWidth": 1},
            "L2Params": {"cellCount": 2048},
            "TMParams": {},
        }));
        let params = derive_l4_params(&config.validate().unwrap());

        assert_eq!(params[BASAL_INPUT_WIDTH], json!(512));
        assert_eq!(params[APICAL_INPUT_WIDTH], json!(2048));
        assert_eq!(params["cellsPerColumn"], json!(16));
    }

    #[test]
    fn test_derived_copy_is_detached_from_config() {
        let config = NetworkConfig::new(json!({
            "externalInputSize": 0,
            "sensorInputSize": 64,
            "L4Params": {"cellsPerColumn": 8},
            "L2Params": {"cellCount": 128},
            "TMParams": {},
        }));
        let mut params = derive_l4_params(&config.validate().unwrap());
        params.insert("cellsPerColumn".to_string(), json!(99));

        assert_eq!(params[BASAL_INPUT_WIDTH], json!(0));
        assert_eq!(params[APICAL_INPUT_WIDTH], json!(128));
        assert_eq!(
            config.as_value()["L4Params"],
            json!({"cellsPerColumn": 8})
        );
    }

    #[test]
    fn test_widths_keep_the_callers_values() {
        let config = NetworkConfig::new(json!({
            "externalInputSize": -3,
            "sensorInputSize": 64,
            "L4Params": {},
            "L2Params": {"cellCount": 5_000_000_000u64},
            "TMParams": {},
        }));
        let params = derive_l4_params(&config.validate().unwrap());

        assert_eq!(params[BASAL_INPUT_WIDTH], json!(-3));
        assert_eq!(params[APICAL_INPUT_WIDTH], json!(5_000_000_000u64));
    }
}
