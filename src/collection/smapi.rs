//! Access to the tp_smapi sysfs interface.
//!
//! Reads never fail: an unreadable or malformed property degrades to a safe
//! default (0, or idle for `state`). Writes are best-effort: a permission
//! failure gets one shot through the setuid helper, anything else is logged
//! and dropped, since the next pass recomputes everything from scratch
//! anyway.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Command,
};

use super::{
    BatteryId, BatteryState, ChargeState, SystemState, AC_CONNECTED, FORCE_DISCHARGE, INSTALLED,
    INHIBIT_CHARGE_MINUTES, POWER_AVG, REMAINING_PERCENT, STATE,
};

/// Where tp_smapi lives on a stock kernel module install.
pub const SMAPI_DIR: &str = "/sys/devices/platform/smapi";

/// Setuid helper used when a direct write is denied.
const SMAPI_BATTACCESS: &str = "/usr/bin/smapi-battaccess";

/// Read side of the smapi interface.
pub trait SmapiRead {
    /// Raw property read. `battery` of `None` addresses the top-level
    /// directory (i.e. `ac_connected`). Unreadable resources yield an
    /// empty string.
    fn read_raw(&self, battery: Option<BatteryId>, prop: &str) -> String;

    /// Integer property read, defaulting to 0 on malformed or missing
    /// input. Some firmware reports percentages as floats, hence the
    /// second parse.
    fn read_int(&self, battery: Option<BatteryId>, prop: &str) -> i64 {
        let raw = self.read_raw(battery, prop);
        let raw = raw.trim();
        raw.parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().map(|v| v as i64))
            .unwrap_or(0)
    }

    fn battery(&self, id: BatteryId) -> BatteryState {
        BatteryState {
            id,
            installed: self.read_int(Some(id), INSTALLED) != 0,
            force_discharge: self.read_int(Some(id), FORCE_DISCHARGE) != 0,
            inhibit_charge_minutes: self.read_int(Some(id), INHIBIT_CHARGE_MINUTES).max(0) as u32,
            remaining_percent: self.read_int(Some(id), REMAINING_PERCENT).max(0) as u32,
            power_avg_mw: self.read_int(Some(id), POWER_AVG) as i32,
            state: ChargeState::from_raw(&self.read_raw(Some(id), STATE)),
        }
    }

    /// Capture a fresh snapshot of both batteries plus AC status.
    fn snapshot(&self) -> SystemState {
        SystemState {
            ac_connected: self.read_int(None, AC_CONNECTED) != 0,
            bat0: self.battery(BatteryId::Bat0),
            bat1: self.battery(BatteryId::Bat1),
        }
    }
}

/// Write side of the smapi interface. Must be fire-and-forget; the policy
/// has no retry path within one pass.
pub trait SmapiWrite {
    fn write_raw(&self, battery: BatteryId, prop: &str, value: u32);
}

/// The real sysfs-backed implementation.
#[derive(Debug)]
pub struct SysfsSmapi {
    base: PathBuf,
    helper: PathBuf,
}

impl SysfsSmapi {
    pub fn new() -> Self {
        Self::with_base(SMAPI_DIR)
    }

    /// Root the interface somewhere else (tests point this at a scratch
    /// directory mimicking the sysfs layout).
    pub fn with_base<P: AsRef<Path>>(base: P) -> Self {
        SysfsSmapi {
            base: base.as_ref().to_path_buf(),
            helper: PathBuf::from(SMAPI_BATTACCESS),
        }
    }

    fn prop_path(&self, battery: Option<BatteryId>, prop: &str) -> PathBuf {
        match battery {
            Some(id) => self.base.join(id.sysfs_name()).join(prop),
            None => self.base.join(prop),
        }
    }

    fn write_via_helper(&self, battery: BatteryId, prop: &str, value: u32) {
        let status = Command::new(&self.helper)
            .arg("-s")
            .arg(battery.index().to_string())
            .arg(prop)
            .arg(value.to_string())
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                warn!(
                    "could not set {prop}={value} on {}: helper exited with {status}",
                    battery.sysfs_name()
                );
            }
            Err(err) => {
                warn!(
                    "could not set {prop}={value} on {}: helper failed to run: {err}",
                    battery.sysfs_name()
                );
            }
        }
    }
}

impl Default for SysfsSmapi {
    fn default() -> Self {
        Self::new()
    }
}

impl SmapiRead for SysfsSmapi {
    fn read_raw(&self, battery: Option<BatteryId>, prop: &str) -> String {
        fs::read_to_string(self.prop_path(battery, prop)).unwrap_or_default()
    }
}

impl SmapiWrite for SysfsSmapi {
    fn write_raw(&self, battery: BatteryId, prop: &str, value: u32) {
        info!("setting {}/{prop} => {value}", battery.sysfs_name());

        let path = self.prop_path(Some(battery), prop);
        match fs::write(&path, value.to_string()) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                // One elevation attempt via the setuid helper, then give
                // up for this cycle.
                self.write_via_helper(battery, prop, value);
            }
            Err(err) => {
                warn!(
                    "could not set {prop}={value} on {}: {err}",
                    battery.sysfs_name()
                );
            }
        }
    }
}

/// A writer that only logs what it would do.
#[derive(Debug, Default)]
pub struct DryRunWriter;

impl SmapiWrite for DryRunWriter {
    fn write_raw(&self, battery: BatteryId, prop: &str, value: u32) {
        info!("dry run: would set {}/{prop} => {value}", battery.sysfs_name());
    }
}
