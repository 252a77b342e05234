//! The balancing policy core: pure functions from a captured snapshot plus
//! configuration to the set of device writes needed to reach the target
//! state. No in-process state survives between passes; the flags already on
//! the device are the only memory.

pub mod charge;
pub mod discharge;

use crate::collection::{
    smapi::SmapiWrite, BatteryId, SystemState, FORCE_DISCHARGE, INHIBIT_CHARGE_MINUTES,
};

/// Strategy for selecting the battery to discharge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DischargeStrategy {
    /// Drain one battery until it falls `threshold` points behind the
    /// other, then switch.
    #[default]
    Leapfrog,
    /// Always drain whichever battery has strictly more charge left.
    Chasing,
    /// Leave discharge selection to the firmware.
    System,
}

/// Strategy for selecting the battery to charge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChargeStrategy {
    Leapfrog,
    /// Always charge whichever battery has strictly less charge left.
    Chasing,
    /// Tiered thresholds giving a preferred battery first claim at every
    /// threshold crossing.
    #[default]
    Brackets,
    /// Leave charge selection to the firmware.
    System,
}

/// Policy configuration consumed by both deciders. Supplied externally
/// (config file / CLI), never computed here.
#[derive(Clone, Debug)]
pub struct BalancePolicy {
    pub discharge_strategy: DischargeStrategy,
    pub discharge_leapfrog_threshold: u32,
    pub charge_strategy: ChargeStrategy,
    pub charge_leapfrog_threshold: u32,
    /// Ascending percent thresholds for [`ChargeStrategy::Brackets`].
    pub charge_brackets: Vec<u32>,
    pub preferred_battery: BatteryId,
}

impl Default for BalancePolicy {
    fn default() -> Self {
        BalancePolicy {
            discharge_strategy: DischargeStrategy::Leapfrog,
            discharge_leapfrog_threshold: 5,
            charge_strategy: ChargeStrategy::Brackets,
            charge_leapfrog_threshold: 10,
            charge_brackets: vec![10, 20, 80, 90, 95, 100],
            preferred_battery: BatteryId::Bat0,
        }
    }
}

/// The writable controls tp_smapi exposes per battery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    ForceDischarge,
    InhibitCharge,
}

impl Control {
    pub fn prop(self) -> &'static str {
        match self {
            Control::ForceDischarge => FORCE_DISCHARGE,
            Control::InhibitCharge => INHIBIT_CHARGE_MINUTES,
        }
    }
}

/// A single device control write produced by a decision pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlWrite {
    pub battery: BatteryId,
    pub control: Control,
    pub value: u32,
}

impl ControlWrite {
    pub(crate) fn force_discharge(battery: BatteryId, on: bool) -> Self {
        ControlWrite {
            battery,
            control: Control::ForceDischarge,
            value: on as u32,
        }
    }

    pub(crate) fn inhibit_charge(battery: BatteryId, minutes: u32) -> Self {
        ControlWrite {
            battery,
            control: Control::InhibitCharge,
            value: minutes,
        }
    }
}

/// Run both deciders against a snapshot and collect the writes needed to
/// transition the device. Stable decisions on a stable snapshot produce an
/// empty set, so repeated passes are no-ops on the hardware.
pub fn run_pass(state: &SystemState, policy: &BalancePolicy) -> Vec<ControlWrite> {
    let mut writes = charge::decide(
        state,
        policy.charge_strategy,
        policy.charge_leapfrog_threshold,
        &policy.charge_brackets,
        policy.preferred_battery,
    );
    writes.extend(discharge::decide(
        state,
        policy.discharge_strategy,
        policy.discharge_leapfrog_threshold,
    ));
    writes
}

/// Apply a decision pass through a writer. Each write is independent and
/// best-effort; a half-applied pair is resolved on the next pass.
pub fn apply_writes(writes: &[ControlWrite], writer: &dyn SmapiWrite) {
    for write in writes {
        writer.write_raw(write.battery, write.control.prop(), write.value);
    }
}


#[cfg(test)]
mod tests {
    use super::{test_util::*, *};
    use crate::collection::ChargeState;

    #[test]
    fn pass_combines_charge_and_discharge_writes() {
        // On battery, chasing both ways: bat0 (60%) should be forced to
        // discharge; charge decisions are cleared/no-op without AC.
        let state = system(false, 60, 40);
        let policy = BalancePolicy {
            discharge_strategy: DischargeStrategy::Chasing,
            charge_strategy: ChargeStrategy::Chasing,
            ..Default::default()
        };

        let writes = run_pass(&state, &policy);
        assert_eq!(
            writes,
            vec![ControlWrite::force_discharge(BatteryId::Bat0, true)]
        );
    }

    #[test]
    fn stable_state_produces_no_writes() {
        // Already forced the right battery, nothing inhibited, no AC: the
        // whole pass is a no-op.
        let mut state = system(false, 60, 40);
        state.bat0.force_discharge = true;
        state.bat0.state = ChargeState::Discharging;
        let policy = BalancePolicy {
            discharge_strategy: DischargeStrategy::Chasing,
            charge_strategy: ChargeStrategy::Chasing,
            ..Default::default()
        };

        assert!(run_pass(&state, &policy).is_empty());
    }
}
