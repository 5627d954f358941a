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

/// The consolidated ThermalSubsystem resource. Readings live one hop away in
/// ThermalMetrics; fans are their own collection.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ThermalSubsystem {
    pub status: Option<ResourceStatus>,
    pub thermal_metrics: Option<ODataId>,
    pub fans: Option<ODataId>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ThermalMetrics {
    #[serde(default)]
    pub temperature_readings_celsius: Vec<TemperatureReading>,
    pub temperature_summary_celsius: Option<serde_json::Value>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct TemperatureReading {
    pub device_name: Option<String>,
    pub reading: Option<f64>,
}

/// A fan member of the ThermalSubsystem Fans collection.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct FanDetail {
    pub id: Option<String>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    pub speed_percent: Option<SensorExcerpt>,
    pub status: Option<ResourceStatus>,
}

/// The legacy combined Thermal resource under Chassis.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Thermal {
    #[serde(default)]
    pub temperatures: Vec<Temperature>,
    #[serde(default)]
    pub fans: Vec<Fan>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Temperature {
    pub member_id: Option<String>,
    pub name: Option<String>,
    pub physical_context: Option<String>,
    pub reading_celsius: Option<f64>,
    pub upper_threshold_critical: Option<f64>,
    pub status: Option<ResourceStatus>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Fan {
    pub member_id: Option<String>,
    #[serde(alias = "FanName")] // pre-1.1 schema revisions
    pub name: Option<String>,
    pub reading: Option<f64>,
    pub reading_units: Option<String>,
    pub status: Option<ResourceStatus>,
}

#[cfg(test)]
mod test {
    #[test]
    fn test_thermal_legacy_parser() {
        let data = include_str!("testdata/thermal_legacy.json");
        let result: super::Thermal = serde_json::from_str(data).unwrap();
        assert_eq!(result.temperatures.len(), 2);
        assert_eq!(result.fans.len(), 2);
        assert_eq!(result.fans[0].reading, Some(4704.0));
        assert_eq!(result.fans[0].name.as_deref(), Some("Fan 1A"));
    }

    #[test]
    fn test_thermal_metrics_parser() {
        let data = include_str!("testdata/thermal_metrics.json");
        let result: super::ThermalMetrics = serde_json::from_str(data).unwrap();
        assert_eq!(result.temperature_readings_celsius.len(), 2);
        assert_eq!(
            result.temperature_readings_celsius[0].reading,
            Some(21.0)
        );
    }
}
