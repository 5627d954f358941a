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

use crate::vendor::{CyclePlan, VendorOps};

/// Lenovo XCC is well behaved: session auth, single-shot ForceRestart on
/// current firmware. Older firmware rejects ForceRestart, hence the
/// fallback. Boot progress needs no augmentation, XCC reports the standard
/// BootProgress resource.
pub(crate) struct Lenovo;

impl VendorOps for Lenovo {
    fn cycle_plan(&self) -> CyclePlan {
        CyclePlan::RestartFirst {
            fallback_settle: Duration::from_secs(3),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::system::ComputerSystem;
    use crate::vendor::Vendor;
    use crate::BootProgressReport;

    #[test]
    fn test_cycle_plan_restarts_first() {
        assert_eq!(
            Lenovo.cycle_plan(),
            CyclePlan::RestartFirst {
                fallback_settle: Duration::from_secs(3)
            }
        );
    }

    #[test]
    fn test_boot_progress_untouched() {
        let data = include_str!("model/testdata/system_lenovo.json");
        let system: ComputerSystem = serde_json::from_str(data).unwrap();
        let progress = system.boot_progress.clone();
        let mut report = BootProgressReport {
            vendor: Vendor::Lenovo,
            system_id: "1".to_string(),
            power_state: None,
            status: None,
            boot: None,
            boot_progress: progress.clone(),
            dell_system_status: None,
            note: None,
        };
        Lenovo.augment_boot_progress(&system, &mut report);
        assert!(report.dell_system_status.is_none());
        assert_eq!(report.boot_progress, progress);
    }
}
