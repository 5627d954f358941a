/*
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
use serde::{Deserialize, Serialize};

use super::{ODataId, ResourceStatus, SensorExcerpt};

/// The consolidated PowerSubsystem resource (Redfish 2020.4 and later).
/// Power supplies hang off it as a separate collection.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PowerSubsystem {
    pub capacity_watts: Option<f64>,
    pub status: Option<ResourceStatus>,
    pub power_supplies: Option<ODataId>,
}

/// One power supply, from either API generation. The legacy resource embeds
/// these inline; the subsystem links to them as collection members.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PowerSupply {
    pub id: Option<String>,
    pub member_id: Option<String>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub part_number: Option<String>,
    pub firmware_version: Option<String>,
    pub power_capacity_watts: Option<f64>, // present but null on some Supermicro
    pub line_input_voltage: Option<f64>,
    pub last_power_output_watts: Option<f64>,
    pub hot_pluggable: Option<bool>,
    pub status: Option<ResourceStatus>,
}

/// The legacy combined Power resource under Chassis.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Power {
    #[serde(default)]
    pub power_supplies: Vec<PowerSupply>,
    #[serde(default)]
    pub power_control: Vec<PowerControl>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PowerControl {
    pub member_id: Option<String>,
    pub name: Option<String>,
    pub power_allocated_watts: Option<f64>,
    pub power_capacity_watts: Option<f64>,
    pub power_consumed_watts: Option<f64>,
    pub power_requested_watts: Option<f64>,
    pub power_metrics: Option<PowerMetrics>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PowerMetrics {
    pub average_consumed_watts: Option<f64>,
    pub interval_in_min: Option<i64>,
    pub max_consumed_watts: Option<f64>,
    pub min_consumed_watts: Option<f64>,
}

/// Chassis EnvironmentMetrics, the newest of the power telemetry resources.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentMetrics {
    pub power_watts: Option<SensorExcerpt>,
    #[serde(rename = "EnergykWh")]
    pub energy_kwh: Option<SensorExcerpt>,
    pub temperature_celsius: Option<SensorExcerpt>,
    pub humidity_percent: Option<SensorExcerpt>,
}

#[cfg(test)]
mod test {
    #[test]
    fn test_power_legacy_parser() {
        let data = include_str!("testdata/power_legacy.json");
        let result: super::Power = serde_json::from_str(data).unwrap();
        assert_eq!(result.power_supplies.len(), 2);
        assert_eq!(
            result.power_supplies[0].last_power_output_watts,
            Some(112.0)
        );
        assert_eq!(
            result.power_control[0].power_consumed_watts,
            Some(224.0)
        );
    }

    #[test]
    fn test_power_subsystem_parser() {
        let data = include_str!("testdata/power_subsystem.json");
        let result: super::PowerSubsystem = serde_json::from_str(data).unwrap();
        assert_eq!(result.capacity_watts, Some(1600.0));
        assert!(result.power_supplies.is_some());
    }

    #[test]
    fn test_environment_metrics_parser() {
        let data = include_str!("testdata/environment_metrics.json");
        let result: super::EnvironmentMetrics = serde_json::from_str(data).unwrap();
        assert_eq!(result.power_watts.unwrap().reading, Some(241.5));
        assert_eq!(result.energy_kwh.unwrap().reading, Some(1712.0));
    }
}
