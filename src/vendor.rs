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
use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::model::system::ComputerSystem;
use crate::BootProgressReport;

/// BMC vendors this layer knows how to special-case. Everything else runs on
/// the standard Redfish behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    Dell,
    Lenovo,
    Unknown,
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    Basic,
    Session,
}

/// What a detection probe concluded about a BMC. Derived fresh for every
/// operation; never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorProfile {
    pub vendor: Vendor,
    pub auth_method: AuthMethod,
}

impl Vendor {
    /// Basic auth only where we know the vendor wants it (Dell iDRAC).
    /// Session auth is accepted everywhere, so it is the safe default.
    pub fn auth_method(self) -> AuthMethod {
        match self {
            Vendor::Dell => AuthMethod::Basic,
            Vendor::Lenovo | Vendor::Unknown => AuthMethod::Session,
        }
    }

    pub fn profile(self) -> VendorProfile {
        VendorProfile {
            vendor: self,
            auth_method: self.auth_method(),
        }
    }

    pub(crate) fn ops(self) -> &'static dyn VendorOps {
        match self {
            Vendor::Dell => &crate::dell::Dell,
            Vendor::Lenovo => &crate::lenovo::Lenovo,
            Vendor::Unknown => &Standard,
        }
    }
}

/// How to cycle power on a running system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CyclePlan {
    /// ForceOff, wait for the BMC to settle, then On.
    OffThenOn { settle: Duration },
    /// Try a single ForceRestart; if the firmware rejects it, fall back to
    /// ForceOff, settle, On.
    RestartFirst { fallback_settle: Duration },
}

/// Per-vendor behavior. One static instance per `Vendor` variant.
pub(crate) trait VendorOps: Send + Sync {
    fn cycle_plan(&self) -> CyclePlan;

    /// Hook for vendor-specific additions to a boot progress report.
    fn augment_boot_progress(&self, _system: &ComputerSystem, _report: &mut BootProgressReport) {}
}

/// Plain Redfish behavior for BMCs we could not identify.
pub(crate) struct Standard;

impl VendorOps for Standard {
    fn cycle_plan(&self) -> CyclePlan {
        CyclePlan::RestartFirst {
            fallback_settle: Duration::from_secs(3),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_basic_auth_only_for_dell() {
        assert_eq!(Vendor::Dell.auth_method(), AuthMethod::Basic);
        assert_eq!(Vendor::Lenovo.auth_method(), AuthMethod::Session);
        assert_eq!(Vendor::Unknown.auth_method(), AuthMethod::Session);
    }

    #[test]
    fn test_unknown_vendor_restarts_first() {
        assert_eq!(
            Vendor::Unknown.ops().cycle_plan(),
            CyclePlan::RestartFirst {
                fallback_settle: Duration::from_secs(3)
            }
        );
    }
}
