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
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::{self, AuthContext};
use crate::model::chassis::Chassis;
use crate::model::pcie::{PCIeDevice, PCIeSlots};
use crate::model::power::{EnvironmentMetrics, Power, PowerSubsystem, PowerSupply};
use crate::model::system::{ComputerSystem, SystemPowerControl};
use crate::model::thermal::{FanDetail, Thermal, ThermalMetrics, ThermalSubsystem};
use crate::model::Collection;
use crate::network::{api_path, RedfishHttpClient};
use crate::vendor::Vendor;
use crate::{
    power, resolve, BmcOps, BootProgressReport, ChassisInfo, FanReport, Operation,
    PcieInventory, PowerActionReport, PowerCycleReport, PowerMetricsReport, PowerStateReport,
    PowerSupplyReport, RedfishError, SlotSummary, ThermalReport,
};

/// The operation facade for one BMC. Every public operation is a complete,
/// self-contained exchange: detect the vendor, take credentials, do the
/// work, give the credentials back. Nothing survives between calls.
#[derive(Debug)]
pub struct RedfishAccess {
    net: RedfishHttpClient,
    settle_delay: Option<Duration>,
}

impl RedfishAccess {
    pub(crate) fn new(net: RedfishHttpClient, settle_delay: Option<Duration>) -> Self {
        Self { net, settle_delay }
    }
}

#[async_trait]
impl BmcOps for RedfishAccess {
    async fn get_power_state(&self) -> Result<PowerStateReport, RedfishError> {
        let auth = auth::acquire(&self.net).await?;
        let result = self.power_state_inner(&auth).await;
        auth.release(&self.net).await;
        result
    }

    async fn power(&self, action: SystemPowerControl) -> Result<PowerActionReport, RedfishError> {
        let auth = auth::acquire(&self.net).await?;
        let result = self.power_inner(&auth, action).await;
        auth.release(&self.net).await;
        result
    }

    async fn power_cycle(&self) -> Result<PowerCycleReport, RedfishError> {
        let auth = auth::acquire(&self.net).await?;
        let result = self.power_cycle_inner(&auth).await;
        auth.release(&self.net).await;
        result
    }

    async fn get_pcie_devices(&self) -> Result<PcieInventory, RedfishError> {
        let auth = auth::acquire(&self.net).await?;
        let result = self.pcie_devices_inner(&auth).await;
        auth.release(&self.net).await;
        result
    }

    async fn get_pcie_device_by_slot(&self, slot_id: &str) -> Result<PCIeDevice, RedfishError> {
        let auth = auth::acquire(&self.net).await?;
        let result = resolve::pcie_device_by_slot(&self.net, &auth, slot_id).await;
        auth.release(&self.net).await;
        result
    }

    async fn get_boot_progress(&self) -> Result<BootProgressReport, RedfishError> {
        let auth = auth::acquire(&self.net).await?;
        let result = self.boot_progress_inner(&auth).await;
        auth.release(&self.net).await;
        result
    }

    async fn get_power_supply_status(&self) -> Result<PowerSupplyReport, RedfishError> {
        let auth = auth::acquire(&self.net).await?;
        let result = self.power_supply_inner(&auth).await;
        auth.release(&self.net).await;
        result
    }

    async fn get_power_metrics(&self) -> Result<PowerMetricsReport, RedfishError> {
        let auth = auth::acquire(&self.net).await?;
        let result = self.power_metrics_inner(&auth).await;
        auth.release(&self.net).await;
        result
    }

    async fn get_thermal_sensors(&self) -> Result<ThermalReport, RedfishError> {
        let auth = auth::acquire(&self.net).await?;
        let result = self.thermal_inner(&auth).await;
        auth.release(&self.net).await;
        result
    }

    async fn get_fan_status(&self) -> Result<FanReport, RedfishError> {
        let auth = auth::acquire(&self.net).await?;
        let result = self.fan_inner(&auth).await;
        auth.release(&self.net).await;
        result
    }

    async fn execute(&self, operation: Operation) -> Result<serde_json::Value, RedfishError> {
        match operation {
            Operation::GetPowerState => to_json(self.get_power_state().await?),
            Operation::PowerOn => to_json(self.power(SystemPowerControl::On).await?),
            Operation::PowerOff => to_json(self.power(SystemPowerControl::ForceOff).await?),
            Operation::PowerCycle => to_json(self.power_cycle().await?),
            Operation::GracefulShutdown => {
                to_json(self.power(SystemPowerControl::GracefulShutdown).await?)
            }
            Operation::GracefulRestart => {
                to_json(self.power(SystemPowerControl::GracefulRestart).await?)
            }
            Operation::GetPcieDevices => to_json(self.get_pcie_devices().await?),
            Operation::GetPcieDeviceBySlot { slot_id } => {
                to_json(self.get_pcie_device_by_slot(&slot_id).await?)
            }
            Operation::GetBootProgress => to_json(self.get_boot_progress().await?),
            Operation::GetPowerSupplyStatus => to_json(self.get_power_supply_status().await?),
            Operation::GetPowerMetrics => to_json(self.get_power_metrics().await?),
            Operation::GetThermalSensors => to_json(self.get_thermal_sensors().await?),
            Operation::GetFanStatus => to_json(self.get_fan_status().await?),
        }
    }
}

impl RedfishAccess {
    async fn power_state_inner(
        &self,
        auth: &AuthContext,
    ) -> Result<PowerStateReport, RedfishError> {
        let system_id = resolve::system_id(&self.net, auth).await;
        let (_status_code, system): (_, ComputerSystem) = self
            .net
            .get(&format!("Systems/{system_id}"), auth.scheme())
            .await?;
        Ok(PowerStateReport {
            vendor: auth.vendor(),
            system_id,
            power_state: system.power_state,
            status: system.status,
            model: system.model,
            manufacturer: system.manufacturer,
            serial_number: system.serial_number,
            bios_version: system.bios_version,
        })
    }

    async fn power_inner(
        &self,
        auth: &AuthContext,
        action: SystemPowerControl,
    ) -> Result<PowerActionReport, RedfishError> {
        let system_id = resolve::system_id(&self.net, auth).await;
        power::reset(&self.net, auth, &system_id, action).await?;
        Ok(PowerActionReport {
            success: true,
            vendor: auth.vendor(),
            system_id,
            action,
            message: format!("Successfully executed {action} action"),
        })
    }

    async fn power_cycle_inner(
        &self,
        auth: &AuthContext,
    ) -> Result<PowerCycleReport, RedfishError> {
        let system_id = resolve::system_id(&self.net, auth).await;
        let (_status_code, system): (_, ComputerSystem) = self
            .net
            .get(&format!("Systems/{system_id}"), auth.scheme())
            .await?;
        power::power_cycle(
            &self.net,
            auth,
            &system_id,
            system.power_state,
            self.settle_delay,
        )
        .await
    }

    async fn pcie_devices_inner(&self, auth: &AuthContext) -> Result<PcieInventory, RedfishError> {
        let system_id = resolve::system_id(&self.net, auth).await;
        let candidates = resolve::pcie_device_candidates(&system_id);
        if let Some((source, body)) = resolve::first_available(&self.net, auth, &candidates).await
        {
            let listing: Collection = parse_body(&source, body)?;
            let devices: Vec<PCIeDevice> =
                resolve::fetch_members(&self.net, auth, &listing.members).await;
            return Ok(PcieInventory::Devices {
                source,
                device_count: devices.len(),
                devices,
            });
        }

        // No device collection anywhere. Chassis identity plus the slot
        // table is the next best answer.
        match self.net.get::<Chassis>("Chassis/1", auth.scheme()).await {
            Ok((_status_code, chassis)) => {
                let mut slots = Vec::new();
                if let Some(link) = &chassis.pcie_slots {
                    match self
                        .net
                        .get::<PCIeSlots>(&api_path(&link.odata_id), auth.scheme())
                        .await
                    {
                        Ok((_status_code, slot_data)) => {
                            slots = slot_data
                                .slots
                                .iter()
                                .map(|slot| SlotSummary {
                                    slot_number: slot.label(),
                                    slot_type: slot.slot_type.clone(),
                                    lanes: slot.lanes,
                                    pcie_type: slot.pcie_type.clone(),
                                    status: slot.status,
                                    oem: slot.oem.clone(),
                                })
                                .collect();
                        }
                        Err(err) => debug!("PCIe slot listing unavailable: {err}"),
                    }
                }
                Ok(PcieInventory::ChassisFallback {
                    message:
                        "Standard PCIe devices endpoint not available. Retrieved chassis and slot information:"
                            .to_string(),
                    chassis_info: ChassisInfo {
                        chassis_type: chassis.chassis_type,
                        manufacturer: chassis.manufacturer,
                        model: chassis.model,
                        serial_number: chassis.serial_number,
                        part_number: chassis.part_number,
                    },
                    pcie_slots: slots,
                })
            }
            Err(err) => {
                debug!("Chassis fallback unavailable: {err}");
                Ok(PcieInventory::Unavailable {
                    message: "PCIe information not available on this BMC".to_string(),
                    note: "This BMC may not support PCIe device enumeration via Redfish API"
                        .to_string(),
                })
            }
        }
    }

    async fn boot_progress_inner(
        &self,
        auth: &AuthContext,
    ) -> Result<BootProgressReport, RedfishError> {
        let system_id = resolve::system_id(&self.net, auth).await;
        let (_status_code, system): (_, ComputerSystem) = self
            .net
            .get(&format!("Systems/{system_id}"), auth.scheme())
            .await?;
        let vendor = auth.vendor();
        let mut report = BootProgressReport {
            vendor,
            system_id,
            power_state: system.power_state,
            status: system.status,
            boot: system.boot.clone(),
            boot_progress: system.boot_progress.clone(),
            dell_system_status: None,
            note: None,
        };
        if report.boot_progress.is_none() && vendor != Vendor::Dell {
            report.note = Some(
                "BootProgress not available on this system. Check Boot and Status fields for system state."
                    .to_string(),
            );
        }
        vendor.ops().augment_boot_progress(&system, &mut report);
        Ok(report)
    }

    async fn power_supply_inner(
        &self,
        auth: &AuthContext,
    ) -> Result<PowerSupplyReport, RedfishError> {
        let candidates = owned(&resolve::POWER_SUPPLY_CANDIDATES);
        match resolve::first_available(&self.net, auth, &candidates).await {
            Some((api, body)) if api.ends_with("PowerSubsystem") => {
                let subsystem: PowerSubsystem = parse_body(&api, body)?;
                let mut power_supplies = Vec::new();
                if let Some(link) = &subsystem.power_supplies {
                    match self
                        .net
                        .get::<Collection>(&api_path(&link.odata_id), auth.scheme())
                        .await
                    {
                        Ok((_status_code, listing)) => {
                            power_supplies = resolve::fetch_members::<PowerSupply>(
                                &self.net,
                                auth,
                                &listing.members,
                            )
                            .await;
                        }
                        Err(err) => debug!("Power supply listing unavailable: {err}"),
                    }
                }
                Ok(PowerSupplyReport::Subsystem {
                    power_supplies,
                    capacity_watts: subsystem.capacity_watts,
                    status: subsystem.status,
                })
            }
            Some((api, body)) => {
                let legacy: Power = parse_body(&api, body)?;
                Ok(PowerSupplyReport::Legacy {
                    power_supplies: legacy.power_supplies,
                    power_control: legacy.power_control,
                })
            }
            None => Ok(PowerSupplyReport::Unavailable {
                note: "No power supply information available on this BMC".to_string(),
            }),
        }
    }

    async fn power_metrics_inner(
        &self,
        auth: &AuthContext,
    ) -> Result<PowerMetricsReport, RedfishError> {
        let candidates = owned(&resolve::POWER_METRICS_CANDIDATES);
        match resolve::first_available(&self.net, auth, &candidates).await {
            Some((api, body)) if api.ends_with("EnvironmentMetrics") => {
                let metrics: EnvironmentMetrics = parse_body(&api, body)?;
                Ok(PowerMetricsReport::Environment {
                    power_watts: metrics.power_watts,
                    energy_kwh: metrics.energy_kwh,
                    temperature_celsius: metrics.temperature_celsius,
                    humidity_percent: metrics.humidity_percent,
                })
            }
            Some((api, body)) => {
                let subsystem: PowerSubsystem = parse_body(&api, body)?;
                Ok(PowerMetricsReport::Subsystem {
                    capacity_watts: subsystem.capacity_watts,
                    status: subsystem.status,
                })
            }
            None => Ok(PowerMetricsReport::Unavailable {
                note: "No power metrics available on this BMC".to_string(),
            }),
        }
    }

    // Thermal does not fit the plain candidate cascade: a ThermalSubsystem
    // without readable ThermalMetrics counts as a miss and falls through to
    // the legacy resource.
    async fn thermal_inner(&self, auth: &AuthContext) -> Result<ThermalReport, RedfishError> {
        match self
            .net
            .get::<ThermalSubsystem>("Chassis/1/ThermalSubsystem", auth.scheme())
            .await
        {
            Ok((_status_code, subsystem)) => {
                if let Some(link) = &subsystem.thermal_metrics {
                    match self
                        .net
                        .get::<ThermalMetrics>(&api_path(&link.odata_id), auth.scheme())
                        .await
                    {
                        Ok((_status_code, metrics)) => {
                            return Ok(ThermalReport::Subsystem {
                                temperature_readings_celsius: metrics
                                    .temperature_readings_celsius,
                                temperature_summary_celsius: metrics.temperature_summary_celsius,
                                status: subsystem.status,
                            });
                        }
                        Err(err) => {
                            debug!("ThermalMetrics unavailable, trying legacy Thermal: {err}")
                        }
                    }
                } else {
                    debug!("ThermalSubsystem has no ThermalMetrics link, trying legacy Thermal");
                }
            }
            Err(err) => debug!("Endpoint Chassis/1/ThermalSubsystem unavailable: {err}"),
        }
        match self
            .net
            .get::<Thermal>("Chassis/1/Thermal", auth.scheme())
            .await
        {
            Ok((_status_code, thermal)) => Ok(ThermalReport::Legacy {
                temperatures: thermal.temperatures,
                fans: thermal.fans,
            }),
            Err(err) => {
                debug!("Endpoint Chassis/1/Thermal unavailable: {err}");
                Ok(ThermalReport::Unavailable {
                    note: "No thermal information available on this BMC".to_string(),
                })
            }
        }
    }

    async fn fan_inner(&self, auth: &AuthContext) -> Result<FanReport, RedfishError> {
        let candidates = owned(&resolve::FAN_CANDIDATES);
        match resolve::first_available(&self.net, auth, &candidates).await {
            Some((api, body)) if api.ends_with("Fans") => {
                let listing: Collection = parse_body(&api, body)?;
                let fans: Vec<FanDetail> =
                    resolve::fetch_members(&self.net, auth, &listing.members).await;
                Ok(FanReport::Subsystem {
                    fan_count: fans.len(),
                    fans,
                })
            }
            Some((api, body)) => {
                let thermal: Thermal = parse_body(&api, body)?;
                Ok(FanReport::Legacy {
                    fan_count: thermal.fans.len(),
                    fans: thermal.fans,
                })
            }
            None => Ok(FanReport::Unavailable {
                note: "No fan information available on this BMC".to_string(),
            }),
        }
    }
}

fn owned(candidates: &[&str]) -> Vec<String> {
    candidates.iter().map(|api| api.to_string()).collect()
}

fn parse_body<T>(api: &str, body: serde_json::Value) -> Result<T, RedfishError>
where
    T: DeserializeOwned,
{
    let body_text = body.to_string();
    serde_json::from_value(body).map_err(|e| RedfishError::JsonDeserialize {
        url: api.to_string(),
        body: body_text,
        source: e,
    })
}

fn to_json<T>(report: T) -> Result<serde_json::Value, RedfishError>
where
    T: serde::Serialize + ::std::fmt::Debug,
{
    serde_json::to_value(&report).map_err(|e| RedfishError::JsonSerialize {
        url: "(local)".to_string(),
        object_debug: format!("{report:?}"),
        source: e,
    })
}
