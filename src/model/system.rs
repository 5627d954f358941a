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
use std::fmt;

use serde::{Deserialize, Serialize};

use super::oem::SystemExtensions;
use super::{ODataId, ResourceStatus};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum SystemPowerControl {
    On,
    GracefulShutdown,
    ForceOff,
    GracefulRestart,
    ForceRestart,
    // Dell also has: PushPowerButton, PowerCycle, and Nmi
    // Lenovo also has: ForceOn and Nmi
}

impl fmt::Display for SystemPowerControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    Off,
    On,
    PoweringOff,
    PoweringOn,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The Systems collection. Its first member tells us the vendor-assigned
/// system identifier ("1" on most machines, "System.Embedded.1" on Dell).
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Systems {
    #[serde(default)]
    pub members: Vec<ODataId>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct BootSettings {
    pub boot_source_override_enabled: Option<String>,
    pub boot_source_override_target: Option<String>,
    pub boot_source_override_mode: Option<String>,
    pub boot_order: Option<Vec<String>>,
}

/// A computer system, limited to what the access layer reads. Almost every
/// field is optional because each vendor omits a different subset.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ComputerSystem {
    pub id: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub bios_version: Option<String>,
    pub power_state: Option<PowerState>,
    pub status: Option<ResourceStatus>,
    pub boot: Option<BootSettings>,
    // Passed through verbatim; Dell never sets it and Lenovo's content
    // varies by XCC firmware, so there is nothing to normalize.
    pub boot_progress: Option<serde_json::Value>,
    pub oem: Option<SystemExtensions>,
}

#[cfg(test)]
mod test {
    #[test]
    fn test_systems_parser() {
        let data = include_str!("testdata/systems.json");
        let result: super::Systems = serde_json::from_str(data).unwrap();
        assert_eq!(result.members.len(), 1);
        assert_eq!(
            result.members[0].last_segment(),
            Some("System.Embedded.1")
        );
    }

    #[test]
    fn test_systems_empty() {
        let result: super::Systems = serde_json::from_str(r#"{"Members": []}"#).unwrap();
        assert!(result.members.is_empty());
    }

    #[test]
    fn test_system_dell() {
        let data = include_str!("testdata/system_dell.json");
        let result: super::ComputerSystem = serde_json::from_str(data).unwrap();
        assert_eq!(result.power_state, Some(super::PowerState::On));
        assert!(result.boot_progress.is_none());
        let dell = result.oem.unwrap().dell.unwrap().dell_system.unwrap();
        assert_eq!(dell.current_rollup_status.as_deref(), Some("OK"));
        assert_eq!(dell.ps_rollup_status.as_deref(), Some("OK"));
    }

    #[test]
    fn test_system_lenovo() {
        let data = include_str!("testdata/system_lenovo.json");
        let result: super::ComputerSystem = serde_json::from_str(data).unwrap();
        assert_eq!(result.power_state, Some(super::PowerState::On));
        let progress = result.boot_progress.unwrap();
        assert_eq!(progress["LastState"], "OSRunning");
        assert_eq!(
            result.boot.unwrap().boot_source_override_enabled.as_deref(),
            Some("Disabled")
        );
    }
}
