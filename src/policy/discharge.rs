//! Decides which battery, if either, should be forced to discharge.

use super::{ControlWrite, DischargeStrategy};
use crate::collection::SystemState;

/// Compute the target `force_discharge` flags for (bat0, bat1).
///
/// Forcing is only ever enabled on battery power with both batteries
/// installed; under [`DischargeStrategy::System`] the firmware owns the
/// choice and both targets are false.
fn targets(state: &SystemState, strategy: DischargeStrategy, threshold: u32) -> (bool, bool) {
    let may_force = !state.ac_connected && state.both_installed();
    if !may_force {
        return (false, false);
    }

    let per0 = i64::from(state.bat0.remaining_percent);
    let per1 = i64::from(state.bat1.remaining_percent);
    let threshold = i64::from(threshold);

    match strategy {
        DischargeStrategy::System => (false, false),
        DischargeStrategy::Leapfrog => {
            if state.bat0.is_discharging() {
                if per1 - per0 > threshold {
                    // The other battery got ahead by more than the buffer;
                    // switch.
                    (false, true)
                } else if per0 > threshold {
                    // Keep draining the active battery down past the buffer.
                    (true, false)
                } else {
                    (false, false)
                }
            } else if state.bat1.is_discharging() {
                if per0 - per1 > threshold {
                    (true, false)
                } else if per1 > threshold {
                    (false, true)
                } else {
                    (false, false)
                }
            } else if per0 > threshold && per0 > per1 {
                (true, false)
            } else if per1 > threshold && per1 > per0 {
                (false, true)
            } else {
                // Tie, or both below the threshold.
                (false, false)
            }
        }
        DischargeStrategy::Chasing => {
            if per0 > per1 {
                (true, false)
            } else if per1 > per0 {
                (false, true)
            } else {
                (false, false)
            }
        }
    }
}

/// Compute the `force_discharge` writes needed to reach the target state.
/// A write is only issued for a battery whose on-device flag differs from
/// the target, so a stable decision is a device no-op.
pub fn decide(
    state: &SystemState, strategy: DischargeStrategy, threshold: u32,
) -> Vec<ControlWrite> {
    let (force0, force1) = targets(state, strategy, threshold);

    let mut writes = Vec::with_capacity(2);
    for (battery, target) in [(&state.bat0, force0), (&state.bat1, force1)] {
        if battery.force_discharge != target {
            writes.push(ControlWrite::force_discharge(battery.id, target));
        }
    }
    writes
}
