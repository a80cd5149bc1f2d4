// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Region creation.

Regions are plain records until the builder commits them to an engine. The
factory embeds parameter blocks without interpreting them.
*/

use std::num::NonZeroU64;

use serde::Serialize;
use serde_json::Value;

use crate::config::ValidatedConfig;
use crate::namespace::{ColumnNamespace, ColumnRole, QualifiedName};
use crate::types::RegionParams;

/// Region type identifiers understood by the engine
pub mod region_types {
    /// Input adapter: outputs `dataOut`, `resetOut`
    pub const RAW_SENSOR: &str = "RawSensor";
    /// First layer
    pub const APICAL_TM_PAIR: &str = "ApicalTMPairRegion";
    /// Sequence memory
    pub const APICAL_TM_SEQUENCE: &str = "ApicalTMSequenceRegion";
    /// Pooling layer
    pub const COLUMN_POOLER: &str = "ColumnPoolerRegion";
}

/// Output width parameter of an input adapter
pub const OUTPUT_WIDTH: &str = "outputWidth";

/// Which input adapter to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAdapterKind {
    External,
    Sensor,
}

impl InputAdapterKind {
    pub fn role(self) -> ColumnRole {
        match self {
            InputAdapterKind::External => ColumnRole::ExternalInput,
            InputAdapterKind::Sensor => ColumnRole::SensorInput,
        }
    }
}

/// A named processing unit awaiting registration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub name: QualifiedName,
    pub type_id: String,
    pub params: RegionParams,
}

impl Region {
    pub fn role(&self) -> ColumnRole {
        self.name.role()
    }
}

/// Creates the regions of one column inside a namespace
#[derive(Debug, Clone, Copy)]
pub struct RegionFactory<'a> {
    namespace: &'a ColumnNamespace,
}

impl<'a> RegionFactory<'a> {
    pub fn new(namespace: &'a ColumnNamespace) -> Self {
        Self { namespace }
    }

    pub fn create_input_adapter(&self, kind: InputAdapterKind, size: NonZeroU64) -> Region {
        let mut params = RegionParams::new();
        params.insert(OUTPUT_WIDTH.to_string(), Value::from(size.get()));
        Region {
            name: self.namespace.qualify(kind.role()),
            type_id: region_types::RAW_SENSOR.to_string(),
            params,
        }
    }

    /// Adapter for an input that may be switched off; `None` yields no region
    pub fn create_optional_input_adapter(
        &self,
        kind: InputAdapterKind,
        size: Option<NonZeroU64>,
    ) -> Option<Region> {
        size.map(|size| self.create_input_adapter(kind, size))
    }

    pub fn create_layer(&self, role: ColumnRole, type_id: &str, params: RegionParams) -> Region {
        Region {
            name: self.namespace.qualify(role),
            type_id: type_id.to_string(),
            params,
        }
    }

    /// Every region of the column, with `l4_params` already derived
    pub fn create_column(
        &self,
        config: &ValidatedConfig<'_>,
        l4_params: RegionParams,
    ) -> ColumnRegions {
        ColumnRegions {
            external_input: self.create_optional_input_adapter(
                InputAdapterKind::External,
                config.external_input_size,
            ),
            sensor_input: self
                .create_input_adapter(InputAdapterKind::Sensor, config.sensor_input_size),
            l4_column: self.create_layer(
                ColumnRole::L4Column,
                region_types::APICAL_TM_PAIR,
                l4_params,
            ),
            tm_column: self.create_layer(
                ColumnRole::TmColumn,
                region_types::APICAL_TM_SEQUENCE,
                config.tm_params.clone(),
            ),
            l2_column: self.create_layer(
                ColumnRole::L2Column,
                region_types::COLUMN_POOLER,
                config.l2_params.clone(),
            ),
        }
    }
}

/// The regions of one column; only the external input may be absent
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRegions {
    pub external_input: Option<Region>,
    pub sensor_input: Region,
    pub l4_column: Region,
    pub tm_column: Region,
    pub l2_column: Region,
}

impl ColumnRegions {
    pub fn get(&self, role: ColumnRole) -> Option<&Region> {
        match role {
            ColumnRole::ExternalInput => self.external_input.as_ref(),
            ColumnRole::SensorInput => Some(&self.sensor_input),
            ColumnRole::L4Column => Some(&self.l4_column),
            ColumnRole::TmColumn => Some(&self.tm_column),
            ColumnRole::L2Column => Some(&self.l2_column),
        }
    }

    /// Present regions in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Region> + '_ {
        ColumnRole::ALL.into_iter().filter_map(move |role| self.get(role))
    }

    pub fn region_count(&self) -> usize {
        self.iter().count()
    }

    pub fn into_vec(self) -> Vec<Region> {
        let mut regions = Vec::with_capacity(5);
        regions.extend(self.external_input);
        regions.push(self.sensor_input);
        regions.push(self.l4_column);
        regions.push(self.tm_column);
        regions.push(self.l2_column);
        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use serde_json::json;

    fn config(external: u32) -> NetworkConfig {
        NetworkConfig::new(json!({
            "externalInputSize": external,
            "sensorInputSize": 150,
            "L4Params": {"cellsPerColumn": 16},
            "L2Params": {"cellCount": 4096},
            "TMParams": {"cellsPerColumn": 32},
        }))
    }

    #[test]
    fn test_input_adapter_embeds_output_width() {
        let ns = ColumnNamespace::new("_7");
        let region = RegionFactory::new(&ns)
            .create_input_adapter(InputAdapterKind::Sensor, NonZeroU64::new(150).unwrap());

        assert_eq!(region.name, "sensorInput_7");
        assert_eq!(region.type_id, region_types::RAW_SENSOR);
        assert_eq!(region.params[OUTPUT_WIDTH], json!(150));
    }

    #[test]
    fn test_disabled_adapter_yields_no_region() {
        let ns = ColumnNamespace::default();
        let factory = RegionFactory::new(&ns);
        assert!(factory
            .create_optional_input_adapter(InputAdapterKind::External, None)
            .is_none());
    }

    #[test]
    fn test_create_column_with_external_input() {
        let ns = ColumnNamespace::default();
        let doc = config(1024);
        let validated = doc.validate().unwrap();
        let regions = RegionFactory::new(&ns).create_column(&validated, RegionParams::new());

        let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["externalInput", "sensorInput", "L4Column", "TMColumn", "L2Column"]
        );
        assert_eq!(regions.tm_column.params["cellsPerColumn"], json!(32));
        assert_eq!(regions.l2_column.type_id, region_types::COLUMN_POOLER);
        assert_eq!(regions.region_count(), 5);
    }

    #[test]
    fn test_create_column_without_external_input() {
        let ns = ColumnNamespace::new("_A");
        let doc = config(0);
        let validated = doc.validate().unwrap();
        let regions = RegionFactory::new(&ns).create_column(&validated, RegionParams::new());

        assert!(regions.get(ColumnRole::ExternalInput).is_none());
        assert_eq!(regions.region_count(), 4);
        assert_eq!(regions.into_vec()[0].name, "sensorInput_A");
    }

    #[test]
    fn test_creation_is_repeatable() {
        let ns = ColumnNamespace::new("_B");
        let doc = config(64);
        let validated = doc.validate().unwrap();
        let factory = RegionFactory::new(&ns);
        assert_eq!(
            factory.create_column(&validated, RegionParams::new()),
            factory.create_column(&validated, RegionParams::new())
        );
    }
}
