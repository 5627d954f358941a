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

use super::ResourceStatus;

/// A PCIe device resource. Lenovo pads its collection with all-null
/// "Adapter" entries, hence the blanket Options.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PCIeDevice {
    pub id: Option<String>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    pub serial_number: Option<String>,
    pub device_type: Option<String>,
    pub firmware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
    #[serde(rename = "PCIeInterface", skip_serializing_if = "Option::is_none")]
    pub pcie_interface: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oem: Option<serde_json::Value>,
}

/// The Chassis PCIeSlots resource, used when no device collection exists.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PCIeSlots {
    #[serde(default)]
    pub slots: Vec<PCIeSlot>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PCIeSlot {
    pub slot_number: Option<i64>,
    pub slot_type: Option<String>,
    pub lanes: Option<i64>,
    #[serde(rename = "PCIeType")]
    pub pcie_type: Option<String>,
    pub status: Option<ResourceStatus>,
    pub location: Option<SlotLocation>,
    pub oem: Option<serde_json::Value>,
}

impl PCIeSlot {
    /// Dell numbers its slots; Lenovo only labels them via PartLocation.
    pub fn label(&self) -> Option<String> {
        self.slot_number.map(|n| n.to_string()).or_else(|| {
            self.location
                .as_ref()
                .and_then(|l| l.part_location.as_ref())
                .and_then(|p| p.service_label.clone())
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct SlotLocation {
    pub part_location: Option<PartLocation>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PartLocation {
    pub service_label: Option<String>,
}

#[cfg(test)]
mod test {
    #[test]
    fn test_pcie_device_parser() {
        let data = include_str!("testdata/pcie_device.json");
        let result: super::PCIeDevice = serde_json::from_str(data).unwrap();
        assert_eq!(result.id.as_deref(), Some("slot_3"));
        assert_eq!(result.manufacturer.as_deref(), Some("Mellanox Technologies"));
        assert!(result.pcie_interface.is_some());
    }

    #[test]
    fn test_slot_label() {
        let numbered: super::PCIeSlot =
            serde_json::from_str(r#"{"SlotNumber": 3, "SlotType": "FullLength"}"#).unwrap();
        assert_eq!(numbered.label().as_deref(), Some("3"));

        let labelled: super::PCIeSlot = serde_json::from_str(
            r#"{"Location": {"PartLocation": {"ServiceLabel": "Slot 4"}}}"#,
        )
        .unwrap();
        assert_eq!(labelled.label().as_deref(), Some("Slot 4"));
    }
}
