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
use std::{collections::HashMap, time::Duration};

use tokio::time::sleep;
use tracing::debug;

use crate::auth::AuthContext;
use crate::model::system::{PowerState, SystemPowerControl};
use crate::network::RedfishHttpClient;
use crate::vendor::CyclePlan;
use crate::{PowerCycleReport, RedfishError};

/// POST a primitive reset action. The sequencer issues the command and
/// returns once the BMC accepts it; it does not wait for the PowerState to
/// actually change.
pub(crate) async fn reset(
    net: &RedfishHttpClient,
    auth: &AuthContext,
    system_id: &str,
    action: SystemPowerControl,
) -> Result<(), RedfishError> {
    let api = format!("Systems/{system_id}/Actions/ComputerSystem.Reset");
    let mut arg = HashMap::new();
    arg.insert("ResetType", action.to_string());
    // Lenovo: the expected HTTP response code is 204 No Content
    match net.post(&api, auth.scheme(), arg).await {
        Ok(_status_code) => Ok(()),
        Err(RedfishError::HTTPErrorCode {
            status_code, body, ..
        }) => Err(RedfishError::PowerAction {
            action,
            status_code,
            body,
        }),
        Err(err) => Err(err),
    }
}

/// The composite power cycle. What it actually does depends on the current
/// PowerState and the vendor's cycle plan; callers must read the action
/// sequence from the report rather than assume one.
pub(crate) async fn power_cycle(
    net: &RedfishHttpClient,
    auth: &AuthContext,
    system_id: &str,
    current_state: Option<PowerState>,
    settle_override: Option<Duration>,
) -> Result<PowerCycleReport, RedfishError> {
    let vendor = auth.vendor();

    if current_state == Some(PowerState::Off) {
        reset(net, auth, system_id, SystemPowerControl::On).await?;
        return Ok(PowerCycleReport {
            success: true,
            vendor,
            action: "PowerCycle (was Off, now On)".to_string(),
            sequence: vec![SystemPowerControl::On],
            message: "Server was off, powered on successfully".to_string(),
        });
    }

    match vendor.ops().cycle_plan() {
        CyclePlan::OffThenOn { settle } => {
            reset(net, auth, system_id, SystemPowerControl::ForceOff).await?;
            sleep(settle_override.unwrap_or(settle)).await;
            reset(net, auth, system_id, SystemPowerControl::On).await?;
            Ok(PowerCycleReport {
                success: true,
                vendor,
                action: "PowerCycle (ForceOff + On)".to_string(),
                sequence: vec![SystemPowerControl::ForceOff, SystemPowerControl::On],
                message: format!(
                    "{vendor} server power cycled: ForceOff -> wait {}s -> On",
                    settle.as_secs()
                ),
            })
        }
        CyclePlan::RestartFirst { fallback_settle } => {
            match reset(net, auth, system_id, SystemPowerControl::ForceRestart).await {
                Ok(()) => Ok(PowerCycleReport {
                    success: true,
                    vendor,
                    action: "PowerCycle (ForceRestart)".to_string(),
                    sequence: vec![SystemPowerControl::ForceRestart],
                    message: "Successfully executed ForceRestart".to_string(),
                }),
                Err(err) => {
                    // Not fatal: some firmware has no single-shot restart.
                    debug!("ForceRestart rejected, falling back to ForceOff + On: {err}");
                    reset(net, auth, system_id, SystemPowerControl::ForceOff).await?;
                    sleep(settle_override.unwrap_or(fallback_settle)).await;
                    reset(net, auth, system_id, SystemPowerControl::On).await?;
                    Ok(PowerCycleReport {
                        success: true,
                        vendor,
                        action: "PowerCycle (ForceOff + On)".to_string(),
                        sequence: vec![SystemPowerControl::ForceOff, SystemPowerControl::On],
                        message: "Successfully executed power cycle: ForceOff -> On".to_string(),
                    })
                }
            }
        }
    }
}
