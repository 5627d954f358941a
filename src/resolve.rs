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
use std::collections::HashSet;

use futures::future::join_all;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::AuthContext;
use crate::model::{system::Systems, Collection, ODataId};
use crate::network::{api_path, RedfishHttpClient};
use crate::RedfishError;

/// Identifier used when the Systems collection cannot tell us better.
/// Suggested by the DMTF mockups and what nearly every BMC uses.
const DEFAULT_SYSTEM_ID: &str = "1";

/// Vendors disagree about where PCIe devices live; iDRAC additionally wants
/// the system id embedded. Order is newest/most standard first.
pub(crate) fn pcie_device_candidates(system_id: &str) -> Vec<String> {
    vec![
        format!("Systems/{system_id}/PCIeDevices"),
        "Chassis/1/PCIeDevices".to_string(),
        "Systems/Self/PCIeDevices".to_string(),
    ]
}

pub(crate) const POWER_SUPPLY_CANDIDATES: [&str; 2] =
    ["Chassis/1/PowerSubsystem", "Chassis/1/Power"];

pub(crate) const POWER_METRICS_CANDIDATES: [&str; 2] =
    ["Chassis/1/EnvironmentMetrics", "Chassis/1/PowerSubsystem"];

pub(crate) const FAN_CANDIDATES: [&str; 2] =
    ["Chassis/1/ThermalSubsystem/Fans", "Chassis/1/Thermal"];

/// Fetch the Systems collection and take the first member's trailing path
/// segment. Any failure falls back to "1"; a wrong guess just means later
/// requests 404, which beats failing the whole operation here.
pub(crate) async fn system_id(net: &RedfishHttpClient, auth: &AuthContext) -> String {
    match net.get::<Systems>("Systems", auth.scheme()).await {
        Ok((_status_code, systems)) => systems
            .members
            .first()
            .and_then(|member| member.last_segment())
            .unwrap_or(DEFAULT_SYSTEM_ID)
            .to_string(),
        Err(err) => {
            debug!("System id detection failed, assuming {DEFAULT_SYSTEM_ID}: {err}");
            DEFAULT_SYSTEM_ID.to_string()
        }
    }
}

/// Walks the candidate list in order and returns the first endpoint that
/// answers 2xx, with its parsed body. Once a candidate succeeds the rest are
/// never queried. `None` means the BMC exposes this resource under none of
/// its known names, which old firmware legitimately does.
pub(crate) async fn first_available(
    net: &RedfishHttpClient,
    auth: &AuthContext,
    candidates: &[String],
) -> Option<(String, serde_json::Value)> {
    for api in candidates {
        match net.get::<serde_json::Value>(api, auth.scheme()).await {
            Ok((_status_code, body)) => return Some((api.clone(), body)),
            Err(err) => debug!("Endpoint {api} unavailable: {err}"),
        }
    }
    None
}

/// Dereferences every member of a collection and parses each into `T`.
/// The fetches run concurrently; a member whose detail fetch fails is
/// dropped from the result rather than failing the aggregate. Duplicate
/// member links (Dell lists some devices twice) are fetched once.
pub(crate) async fn fetch_members<T>(
    net: &RedfishHttpClient,
    auth: &AuthContext,
    members: &[ODataId],
) -> Vec<T>
where
    T: DeserializeOwned + ::std::fmt::Debug,
{
    let mut seen = HashSet::new();
    let apis: Vec<String> = members
        .iter()
        .map(|member| api_path(&member.odata_id))
        .filter(|api| seen.insert(api.clone()))
        .collect();
    let fetches = apis.iter().map(|api| async move {
        match net.get::<T>(api, auth.scheme()).await {
            Ok((_status_code, body)) => Some(body),
            Err(err) => {
                debug!("Skipping member {api}: {err}");
                None
            }
        }
    });
    join_all(fetches).await.into_iter().flatten().collect()
}

/// Canonical device id for a user-supplied slot: `3` means `slot_3`, while
/// ids already carrying the slot or onboard prefix pass through untouched.
pub(crate) fn normalize_slot_id(slot_id: &str) -> String {
    if slot_id.starts_with("slot_") || slot_id.starts_with("ob_") {
        slot_id.to_string()
    } else {
        format!("slot_{slot_id}")
    }
}

/// Direct lookup of one PCIe device by its normalized id. Only when that
/// misses do we list the collection, so the error can name the ids that
/// would have worked.
pub(crate) async fn pcie_device_by_slot(
    net: &RedfishHttpClient,
    auth: &AuthContext,
    slot_id: &str,
) -> Result<crate::model::pcie::PCIeDevice, RedfishError> {
    let device_id = normalize_slot_id(slot_id);
    let api = format!("Chassis/1/PCIeDevices/{device_id}");
    match net.get(&api, auth.scheme()).await {
        Ok((_status_code, device)) => Ok(device),
        Err(direct_err) => {
            match net
                .get::<Collection>("Chassis/1/PCIeDevices", auth.scheme())
                .await
            {
                Ok((_status_code, listing)) => {
                    let available = listing
                        .members
                        .iter()
                        .filter_map(|member| member.last_segment())
                        .map(|segment| segment.to_string())
                        .collect();
                    Err(RedfishError::DeviceNotFound {
                        device_id,
                        available,
                    })
                }
                Err(_listing_err) => Err(direct_err),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::normalize_slot_id;

    #[test]
    fn test_bare_index_gets_slot_prefix() {
        assert_eq!(normalize_slot_id("3"), "slot_3");
        assert_eq!(normalize_slot_id("13"), "slot_13");
    }

    #[test]
    fn test_onboard_id_unmodified() {
        assert_eq!(normalize_slot_id("ob_1"), "ob_1");
    }

    #[test]
    fn test_prefixed_id_unmodified() {
        assert_eq!(normalize_slot_id("slot_5"), "slot_5");
    }
}
