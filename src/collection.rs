//! This is the main file to house the dual-battery data model and the
//! snapshot types filled in from the tp_smapi interface.

pub mod smapi;

use std::fmt;

/// Property file names exposed by tp_smapi. `STATE` is string-valued,
/// everything else is integer-valued.
pub const AC_CONNECTED: &str = "ac_connected";
pub const INSTALLED: &str = "installed";
pub const FORCE_DISCHARGE: &str = "force_discharge";
pub const INHIBIT_CHARGE_MINUTES: &str = "inhibit_charge_minutes";
pub const REMAINING_PERCENT: &str = "remaining_percent";
pub const POWER_AVG: &str = "power_avg";
pub const STATE: &str = "state";

/// Index of one of the two battery bays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatteryId {
    Bat0,
    Bat1,
}

impl BatteryId {
    /// The numeric index used in sysfs paths and the privileged helper.
    pub fn index(self) -> usize {
        match self {
            BatteryId::Bat0 => 0,
            BatteryId::Bat1 => 1,
        }
    }

    /// The other bay.
    pub fn other(self) -> BatteryId {
        match self {
            BatteryId::Bat0 => BatteryId::Bat1,
            BatteryId::Bat1 => BatteryId::Bat0,
        }
    }

    /// The sysfs directory name (e.g. `BAT0`).
    pub fn sysfs_name(self) -> &'static str {
        match self {
            BatteryId::Bat0 => "BAT0",
            BatteryId::Bat1 => "BAT1",
        }
    }
}

/// Charging state reported by the firmware for one battery.
///
/// This is a closed three-way classification; anything the firmware reports
/// beyond the two known strings is treated as idle so that new firmware
/// strings degrade to "do nothing" instead of silently shifting policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChargeState {
    Charging,
    Discharging,
    Idle,
}

impl ChargeState {
    pub(crate) fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "charging" => ChargeState::Charging,
            "discharging" => ChargeState::Discharging,
            _ => ChargeState::Idle,
        }
    }

    /// Return the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeState::Charging => "charging",
            ChargeState::Discharging => "discharging",
            ChargeState::Idle => "idle",
        }
    }
}

/// Snapshot of one battery's attributes, captured once per balance pass.
#[derive(Clone, Debug)]
pub struct BatteryState {
    pub id: BatteryId,
    /// Whether the battery is physically present in the bay.
    pub installed: bool,
    /// The forced-discharge flag currently set on the device.
    pub force_discharge: bool,
    /// Nonzero means charging is inhibited for that many minutes. Only
    /// zero/nonzero matters to the policy, but the device contract is an
    /// integer number of minutes, so the carrier stays an integer.
    pub inhibit_charge_minutes: u32,
    pub remaining_percent: u32,
    /// Average power draw in mW; negative while discharging.
    pub power_avg_mw: i32,
    pub state: ChargeState,
}

impl BatteryState {
    pub fn is_charging(&self) -> bool {
        self.state == ChargeState::Charging
    }

    pub fn is_discharging(&self) -> bool {
        self.state == ChargeState::Discharging
    }

    pub fn is_charge_inhibited(&self) -> bool {
        self.inhibit_charge_minutes != 0
    }

    pub fn watt_consumption(&self) -> String {
        format!("{:.2}W", f64::from(self.power_avg_mw) / 1000.0)
    }
}

impl fmt::Display for BatteryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.installed {
            write!(
                f,
                "{}% {} {}",
                self.remaining_percent,
                self.state.as_str(),
                self.watt_consumption()
            )
        } else {
            write!(f, "not installed")
        }
    }
}

/// Snapshot of both batteries plus AC status.
///
/// Immutable once captured; the deciders only describe target writes, they
/// never touch the snapshot. A fresh one is built every pass, so the only
/// "memory" between passes is whatever flags are already on the device.
#[derive(Clone, Debug)]
pub struct SystemState {
    pub ac_connected: bool,
    pub bat0: BatteryState,
    pub bat1: BatteryState,
}

impl SystemState {
    pub fn battery(&self, id: BatteryId) -> &BatteryState {
        match id {
            BatteryId::Bat0 => &self.bat0,
            BatteryId::Bat1 => &self.bat1,
        }
    }

    pub fn both_installed(&self) -> bool {
        self.bat0.installed && self.bat1.installed
    }
}
