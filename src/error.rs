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
use reqwest::StatusCode;

use crate::model::system::SystemPowerControl;

#[derive(thiserror::Error, Debug)]
pub enum RedfishError {
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Operation '{operation}' requires argument '{argument}'")]
    MissingArgument {
        operation: String,
        argument: &'static str,
    },

    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("Network error talking to BMC at {url}. {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status_code} at {url}. {body}")]
    HTTPErrorCode {
        url: String,
        status_code: StatusCode,
        body: String,
    },

    #[error("Could not deserialize response from {url}. Body: {body}. {source}")]
    JsonDeserialize {
        url: String,
        body: String,
        source: serde_json::Error,
    },

    #[error("Could not serialize request body for {url}. Obj: {object_debug}. {source}")]
    JsonSerialize {
        url: String,
        object_debug: String,
        source: serde_json::Error,
    },

    #[error("Remote returned empty body")]
    NoContent,

    #[error("Session creation failed: HTTP {status_code}. {body}")]
    SessionCreation {
        status_code: StatusCode,
        body: String,
    },

    #[error("BMC accepted the session but did not return a {missing} header")]
    SessionIncomplete { missing: &'static str },

    #[error("Power action {action} failed: HTTP {status_code}. {body}")]
    PowerAction {
        action: SystemPowerControl,
        status_code: StatusCode,
        body: String,
    },

    #[error("UnnecessaryOperation such as trying to turn on a machine that is already on.")]
    UnnecessaryOperation,

    #[error("Device '{device_id}' not found. Available devices: {}", .available.join(", "))]
    DeviceNotFound {
        device_id: String,
        available: Vec<String>,
    },
}
