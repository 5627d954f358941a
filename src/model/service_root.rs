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
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::vendor::Vendor;

/// https://redfish.dmtf.org/schemas/v1/ServiceRoot.v1_16_0.json
/// Only the fields needed to identify the vendor; the probe runs
/// unauthenticated so most BMCs redact everything else anyway.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRoot {
    pub product: Option<String>,
    pub redfish_version: Option<String>,
    pub vendor: Option<String>,
    pub oem: Option<HashMap<String, serde_json::Value>>,
}

impl ServiceRoot {
    /// Vendor identified from the `Vendor` key or, failing that, from the
    /// keys of the `Oem` extension object. Dell iDRAC puts a `Dell` entry
    /// there, Lenovo XCC a `Lenovo` entry; the key case varies by firmware.
    pub fn vendor(&self) -> Vendor {
        if let Some(v) = self.vendor.as_deref().and_then(known_vendor) {
            return v;
        }
        if let Some(oem) = &self.oem {
            for key in oem.keys() {
                if let Some(v) = known_vendor(key) {
                    return v;
                }
            }
        }
        Vendor::Unknown
    }
}

fn known_vendor(marker: &str) -> Option<Vendor> {
    match marker.to_lowercase().as_str() {
        "dell" => Some(Vendor::Dell),
        "lenovo" => Some(Vendor::Lenovo),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use crate::vendor::Vendor;

    #[test]
    fn test_dell_service_root() {
        let data = include_str!("testdata/service_root_dell.json");
        let result: super::ServiceRoot = serde_json::from_str(data).unwrap();
        assert_eq!(result.vendor(), Vendor::Dell);
    }

    #[test]
    fn test_lenovo_service_root() {
        let data = include_str!("testdata/service_root_lenovo.json");
        let result: super::ServiceRoot = serde_json::from_str(data).unwrap();
        assert_eq!(result.vendor(), Vendor::Lenovo);
    }

    #[test]
    fn test_lowercase_oem_marker() {
        // some iDRAC firmware revisions use a lowercase oem key
        let result: super::ServiceRoot =
            serde_json::from_str(r#"{"Oem": {"dell": {}}}"#).unwrap();
        assert_eq!(result.vendor(), Vendor::Dell);
    }

    #[test]
    fn test_unmarked_service_root() {
        let result: super::ServiceRoot =
            serde_json::from_str(r#"{"RedfishVersion": "1.6.0"}"#).unwrap();
        assert_eq!(result.vendor(), Vendor::Unknown);
    }
}
