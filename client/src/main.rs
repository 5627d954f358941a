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

/* BMC Redfish test/debug client
 * Also useful for poking at BMCs in inconsistent states.
 *
 * USAGE: ./client -H 10.153.145.103 -U TheBMCUsername -P TheBMCPassword -c get_power_state
 * -H: IP address of the BMC's Redfish API. Should be HTTPS on port 443.
 * Run with no params for help.
 * Run with `-v` for more output.
 */

use anyhow::anyhow;
use bmc_redfish::{BmcOps, BmcTarget, Operation, RedfishClientPool};
use tracing::error;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = getopts::Options::new();

    opts.optflag("h", "help", "Print this help");
    opts.optflag("v", "verbose", "Log at DEBUG level. Default is INFO");
    opts.optopt(
        "H",
        "hostname",
        "Required. Hostname or IP address of BMC Redfish API",
        "HOST",
    );
    opts.optopt("U", "username", "BMC username", "USER");
    opts.optopt("P", "password", "BMC password", "PASS");
    opts.optopt("s", "slot", "Slot id for get_pcie_device_by_slot", "SLOT");
    opts.optopt(
        "c",
        "cmd",
        "Operation to run:
                get_power_state
                power_on
                power_off
                power_cycle
                graceful_shutdown
                graceful_restart
                get_pcie_devices
                get_pcie_device_by_slot
                get_boot_progress
                get_power_supply_status
                get_power_metrics
                get_thermal_sensors
                get_fan_status",
        "CMD",
    );

    let args_given = opts.parse(&args[1..])?;
    if args_given.opt_present("h") || !args_given.opt_present("H") || !args_given.opt_present("c")
    {
        eprintln!(
            "{}",
            opts.usage("client -H bmc_ip -U bmc_user -P bmc_pass -c operation")
        );
        return Ok(());
    }

    let log_level = if args_given.opt_present("v") {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(log_level.into())
        .add_directive("hyper=warn".parse().unwrap());
    tracing_subscriber::registry()
        .with(Layer::default().compact())
        .with(env_filter)
        .init();

    let target = BmcTarget {
        address: args_given.opt_str("H").unwrap(),
        username: args_given.opt_str("U"),
        password: args_given.opt_str("P"),
    };

    let mut op_args = serde_json::Map::new();
    if let Some(slot_id) = args_given.opt_str("s") {
        op_args.insert("slot_id".to_string(), serde_json::Value::String(slot_id));
    }
    let operation = Operation::parse(&args_given.opt_str("c").unwrap(), &op_args)?;

    let pool = RedfishClientPool::builder().build()?;
    let client = pool.client(target)?;
    match client.execute(operation).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(err) => {
            error!("{err}");
            Err(anyhow!("{err}"))
        }
    }
}
