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

use crate::model::system::ComputerSystem;
use crate::vendor::{CyclePlan, VendorOps};
use crate::{BootProgressReport, DellSystemStatus};

pub(crate) struct Dell;

impl VendorOps for Dell {
    fn cycle_plan(&self) -> CyclePlan {
        // iDRAC refuses the On action if it arrives too soon after the off.
        // 5 seconds is what it takes in practice.
        CyclePlan::OffThenOn {
            settle: Duration::from_secs(5),
        }
    }

    /// Dell has no standard BootProgress resource. When it is absent, the
    /// iDRAC rollup statuses are the nearest equivalent signal.
    fn augment_boot_progress(&self, system: &ComputerSystem, report: &mut BootProgressReport) {
        if report.boot_progress.is_some() {
            return;
        }
        let Some(dell_system) = system
            .oem
            .as_ref()
            .and_then(|oem| oem.dell.as_ref())
            .and_then(|wrapper| wrapper.dell_system.as_ref())
        else {
            return;
        };
        report.dell_system_status = Some(DellSystemStatus {
            current_rollup_status: dell_system.current_rollup_status.clone(),
            cpu_rollup_status: dell_system.cpu_rollup_status.clone(),
            fan_rollup_status: dell_system.fan_rollup_status.clone(),
            ps_rollup_status: dell_system.ps_rollup_status.clone(),
            temp_rollup_status: dell_system.temp_rollup_status.clone(),
            storage_rollup_status: dell_system.storage_rollup_status.clone(),
            memory_operation_mode: dell_system.memory_operation_mode.clone(),
            last_system_inventory_time: dell_system.last_system_inventory_time.clone(),
            note: "Dell does not support standard BootProgress. Using OEM RollupStatus instead."
                .to_string(),
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vendor::Vendor;

    fn empty_report() -> BootProgressReport {
        BootProgressReport {
            vendor: Vendor::Dell,
            system_id: "System.Embedded.1".to_string(),
            power_state: None,
            status: None,
            boot: None,
            boot_progress: None,
            dell_system_status: None,
            note: None,
        }
    }

    #[test]
    fn test_cycle_plan_settles_five_seconds() {
        assert_eq!(
            Dell.cycle_plan(),
            CyclePlan::OffThenOn {
                settle: Duration::from_secs(5)
            }
        );
    }

    #[test]
    fn test_rollup_augmentation() {
        let data = include_str!("model/testdata/system_dell.json");
        let system: ComputerSystem = serde_json::from_str(data).unwrap();
        let mut report = empty_report();
        Dell.augment_boot_progress(&system, &mut report);
        let status = report.dell_system_status.expect("rollup block expected");
        assert_eq!(status.current_rollup_status.as_deref(), Some("OK"));
        assert_eq!(status.fan_rollup_status.as_deref(), Some("OK"));
    }

    #[test]
    fn test_no_augmentation_when_boot_progress_present() {
        let data = include_str!("model/testdata/system_dell.json");
        let system: ComputerSystem = serde_json::from_str(data).unwrap();
        let mut report = empty_report();
        report.boot_progress = Some(serde_json::json!({"LastState": "OSRunning"}));
        Dell.augment_boot_progress(&system, &mut report);
        assert!(report.dell_system_status.is_none());
    }

    #[test]
    fn test_no_augmentation_without_oem_block() {
        let system = ComputerSystem::default();
        let mut report = empty_report();
        Dell.augment_boot_progress(&system, &mut report);
        assert!(report.dell_system_status.is_none());
    }
}
