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
use async_trait::async_trait;
use serde::Serialize;

pub mod model;

mod auth;
mod dell;
mod error;
mod lenovo;
mod network;
mod power;
mod resolve;
mod standard;
mod vendor;

pub use error::RedfishError;
pub use model::pcie::PCIeDevice;
pub use model::power::{PowerControl, PowerSupply};
pub use model::system::{BootSettings, PowerState, SystemPowerControl};
pub use model::thermal::{Fan, FanDetail, Temperature, TemperatureReading};
pub use model::{ResourceStatus, SensorExcerpt};
pub use network::{
    BmcTarget, RedfishClientPool, RedfishClientPoolBuilder, DEFAULT_USERNAME, REDFISH_ENDPOINT,
};
pub use standard::RedfishAccess;
pub use vendor::{AuthMethod, Vendor, VendorProfile};

/// Lifecycle and telemetry operations against one BMC. Every call is a
/// complete exchange over one or more HTTP requests: auth detection,
/// credential acquisition and release all happen inside the call.
#[async_trait]
pub trait BmcOps: Send + Sync {
    /// Power state plus the system's identity fields.
    async fn get_power_state(&self) -> Result<PowerStateReport, RedfishError>;

    /// Issue a primitive reset action: on, off, restart, etc.
    async fn power(&self, action: SystemPowerControl) -> Result<PowerActionReport, RedfishError>;

    /// Vendor-aware composite power cycle. Read the action sequence from the
    /// report; it differs by vendor and by the state the system was in.
    async fn power_cycle(&self) -> Result<PowerCycleReport, RedfishError>;

    /// All PCIe devices, from whichever endpoint this BMC exposes them on.
    async fn get_pcie_devices(&self) -> Result<PcieInventory, RedfishError>;

    /// One PCIe device by slot id ("3", "slot_3", or "ob_1" for onboard).
    async fn get_pcie_device_by_slot(&self, slot_id: &str) -> Result<PCIeDevice, RedfishError>;

    /// Boot status. Dell systems get the OEM rollup block in place of the
    /// standard BootProgress resource they lack.
    async fn get_boot_progress(&self) -> Result<BootProgressReport, RedfishError>;

    async fn get_power_supply_status(&self) -> Result<PowerSupplyReport, RedfishError>;

    async fn get_power_metrics(&self) -> Result<PowerMetricsReport, RedfishError>;

    async fn get_thermal_sensors(&self) -> Result<ThermalReport, RedfishError>;

    async fn get_fan_status(&self) -> Result<FanReport, RedfishError>;

    /// Dispatch entry point for thin front ends: runs the operation and
    /// serializes its report.
    async fn execute(&self, operation: Operation) -> Result<serde_json::Value, RedfishError>;
}

/// The operations a dispatch layer may request, with their required
/// arguments embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GetPowerState,
    PowerOn,
    PowerOff,
    PowerCycle,
    GracefulShutdown,
    GracefulRestart,
    GetPcieDevices,
    GetPcieDeviceBySlot { slot_id: String },
    GetBootProgress,
    GetPowerSupplyStatus,
    GetPowerMetrics,
    GetThermalSensors,
    GetFanStatus,
}

impl Operation {
    /// Maps an operation name and its argument mapping onto an `Operation`.
    /// Missing required arguments fail here, before any network call.
    pub fn parse(
        name: &str,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Operation, RedfishError> {
        match name {
            "get_power_state" => Ok(Operation::GetPowerState),
            "power_on" => Ok(Operation::PowerOn),
            "power_off" => Ok(Operation::PowerOff),
            "power_cycle" => Ok(Operation::PowerCycle),
            "graceful_shutdown" => Ok(Operation::GracefulShutdown),
            "graceful_restart" => Ok(Operation::GracefulRestart),
            "get_pcie_devices" => Ok(Operation::GetPcieDevices),
            "get_pcie_device_by_slot" => match args.get("slot_id").and_then(|v| v.as_str()) {
                Some(slot_id) => Ok(Operation::GetPcieDeviceBySlot {
                    slot_id: slot_id.to_string(),
                }),
                None => Err(RedfishError::MissingArgument {
                    operation: name.to_string(),
                    argument: "slot_id",
                }),
            },
            "get_boot_progress" => Ok(Operation::GetBootProgress),
            "get_power_supply_status" => Ok(Operation::GetPowerSupplyStatus),
            "get_power_metrics" => Ok(Operation::GetPowerMetrics),
            "get_thermal_sensors" => Ok(Operation::GetThermalSensors),
            "get_fan_status" => Ok(Operation::GetFanStatus),
            other => Err(RedfishError::UnknownOperation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerStateReport {
    pub vendor: Vendor,
    pub system_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_state: Option<PowerState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bios_version: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerActionReport {
    pub success: bool,
    pub vendor: Vendor,
    pub system_id: String,
    pub action: SystemPowerControl,
    pub message: String,
}

/// Outcome of a composite power cycle. `sequence` lists the primitive
/// actions actually issued, in order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerCycleReport {
    pub success: bool,
    pub vendor: Vendor,
    pub action: String,
    pub sequence: Vec<SystemPowerControl>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PcieInventory {
    #[serde(rename_all = "PascalCase")]
    Devices {
        source: String,
        device_count: usize,
        devices: Vec<PCIeDevice>,
    },
    /// The BMC has no device collection but its chassis resource answers.
    #[serde(rename_all = "PascalCase")]
    ChassisFallback {
        message: String,
        chassis_info: ChassisInfo,
        #[serde(rename = "PCIeSlots")]
        pcie_slots: Vec<SlotSummary>,
    },
    #[serde(rename_all = "PascalCase")]
    Unavailable { message: String, note: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChassisInfo {
    pub chassis_type: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub part_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SlotSummary {
    pub slot_number: Option<String>,
    pub slot_type: Option<String>,
    pub lanes: Option<i64>,
    #[serde(rename = "PCIeType")]
    pub pcie_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oem: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BootProgressReport {
    pub vendor: Vendor,
    pub system_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_state: Option<PowerState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot: Option<BootSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_progress: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dell_system_status: Option<DellSystemStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Dell's aggregated rollup health, reported when the standard BootProgress
/// resource is absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DellSystemStatus {
    pub current_rollup_status: Option<String>,
    #[serde(rename = "CPURollupStatus")]
    pub cpu_rollup_status: Option<String>,
    pub fan_rollup_status: Option<String>,
    #[serde(rename = "PSRollupStatus")]
    pub ps_rollup_status: Option<String>,
    pub temp_rollup_status: Option<String>,
    pub storage_rollup_status: Option<String>,
    pub memory_operation_mode: Option<String>,
    pub last_system_inventory_time: Option<String>,
    pub note: String,
}

/// Power supply status, tagged with the API generation that answered.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "ApiVersion")]
pub enum PowerSupplyReport {
    #[serde(rename = "PowerSubsystem (New)", rename_all = "PascalCase")]
    Subsystem {
        power_supplies: Vec<PowerSupply>,
        #[serde(skip_serializing_if = "Option::is_none")]
        capacity_watts: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<ResourceStatus>,
    },
    #[serde(rename = "Power (Legacy)", rename_all = "PascalCase")]
    Legacy {
        power_supplies: Vec<PowerSupply>,
        power_control: Vec<PowerControl>,
    },
    #[serde(rename_all = "PascalCase")]
    Unavailable { note: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "ApiVersion")]
pub enum PowerMetricsReport {
    #[serde(rename = "EnvironmentMetrics", rename_all = "PascalCase")]
    Environment {
        #[serde(skip_serializing_if = "Option::is_none")]
        power_watts: Option<SensorExcerpt>,
        #[serde(rename = "EnergykWh", skip_serializing_if = "Option::is_none")]
        energy_kwh: Option<SensorExcerpt>,
        #[serde(skip_serializing_if = "Option::is_none")]
        temperature_celsius: Option<SensorExcerpt>,
        #[serde(skip_serializing_if = "Option::is_none")]
        humidity_percent: Option<SensorExcerpt>,
    },
    #[serde(rename = "PowerSubsystem", rename_all = "PascalCase")]
    Subsystem {
        #[serde(skip_serializing_if = "Option::is_none")]
        capacity_watts: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<ResourceStatus>,
    },
    #[serde(rename_all = "PascalCase")]
    Unavailable { note: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "ApiVersion")]
pub enum ThermalReport {
    #[serde(rename = "ThermalSubsystem (New)", rename_all = "PascalCase")]
    Subsystem {
        temperature_readings_celsius: Vec<TemperatureReading>,
        #[serde(skip_serializing_if = "Option::is_none")]
        temperature_summary_celsius: Option<serde_json::Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<ResourceStatus>,
    },
    #[serde(rename = "Thermal (Legacy)", rename_all = "PascalCase")]
    Legacy {
        temperatures: Vec<Temperature>,
        fans: Vec<Fan>,
    },
    #[serde(rename_all = "PascalCase")]
    Unavailable { note: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "ApiVersion")]
pub enum FanReport {
    #[serde(rename = "ThermalSubsystem/Fans (New)", rename_all = "PascalCase")]
    Subsystem {
        fan_count: usize,
        fans: Vec<FanDetail>,
    },
    #[serde(rename = "Thermal (Legacy)", rename_all = "PascalCase")]
    Legacy { fan_count: usize, fans: Vec<Fan> },
    #[serde(rename_all = "PascalCase")]
    Unavailable { note: String },
}

#[cfg(test)]
mod test {
    use super::Operation;

    #[test]
    fn test_operation_parse() {
        let args = serde_json::Map::new();
        assert_eq!(
            Operation::parse("get_power_state", &args).unwrap(),
            Operation::GetPowerState
        );
        assert_eq!(
            Operation::parse("power_cycle", &args).unwrap(),
            Operation::PowerCycle
        );
    }

    #[test]
    fn test_slot_operation_requires_slot_id() {
        let args = serde_json::Map::new();
        let err = Operation::parse("get_pcie_device_by_slot", &args).unwrap_err();
        assert!(matches!(
            err,
            crate::RedfishError::MissingArgument { argument: "slot_id", .. }
        ));

        let mut args = serde_json::Map::new();
        args.insert("slot_id".to_string(), serde_json::json!("3"));
        assert_eq!(
            Operation::parse("get_pcie_device_by_slot", &args).unwrap(),
            Operation::GetPcieDeviceBySlot {
                slot_id: "3".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_operation() {
        let args = serde_json::Map::new();
        assert!(matches!(
            Operation::parse("bios_attrs", &args).unwrap_err(),
            crate::RedfishError::UnknownOperation(_)
        ));
    }
}
