//! Decides which battery should be inhibited from charging, expressed as
//! "ensure the other one is charging".

use super::{ChargeStrategy, ControlWrite};
use crate::collection::{BatteryId, SystemState};

/// Compute the `inhibit_charge_minutes` writes for this pass.
///
/// Off AC, with a bay empty, or under [`ChargeStrategy::System`], nothing
/// may stay inhibited: any existing inhibit flag is cleared and that's it.
pub fn decide(
    state: &SystemState, strategy: ChargeStrategy, threshold: u32, brackets: &[u32],
    preferred: BatteryId,
) -> Vec<ControlWrite> {
    let never_inhibit =
        !state.ac_connected || !state.both_installed() || strategy == ChargeStrategy::System;
    if never_inhibit {
        return [&state.bat0, &state.bat1]
            .into_iter()
            .filter(|battery| battery.is_charge_inhibited())
            .map(|battery| ControlWrite::inhibit_charge(battery.id, 0))
            .collect();
    }

    let per0 = i64::from(state.bat0.remaining_percent);
    let per1 = i64::from(state.bat1.remaining_percent);
    let threshold = i64::from(threshold);

    match strategy {
        ChargeStrategy::System => Vec::new(),
        ChargeStrategy::Leapfrog => {
            // Only intervene once the gap exceeds the buffer, and then
            // direct the current at the lagging battery.
            if per1 - per0 > threshold {
                ensure_charging(state, BatteryId::Bat0)
            } else if per0 - per1 > threshold {
                ensure_charging(state, BatteryId::Bat1)
            } else {
                Vec::new()
            }
        }
        ChargeStrategy::Chasing => {
            if per1 > per0 {
                ensure_charging(state, BatteryId::Bat0)
            } else if per0 > per1 {
                ensure_charging(state, BatteryId::Bat1)
            } else {
                Vec::new()
            }
        }
        ChargeStrategy::Brackets => {
            let unpreferred = preferred.other();
            let percent_pref = i64::from(state.battery(preferred).remaining_percent);
            let percent_unpref = i64::from(state.battery(unpreferred).remaining_percent);

            // Scan the ascending brackets; the preferred battery gets first
            // claim at every threshold crossing.
            for &bracket in brackets {
                let bracket = i64::from(bracket);
                if percent_pref < bracket {
                    return ensure_charging(state, preferred);
                } else if percent_unpref < bracket {
                    return ensure_charging(state, unpreferred);
                }
            }
            Vec::new()
        }
    }
}

/// Flip the inhibit flags so that `target` is the battery receiving charge.
///
/// This is a convergence step, not an unconditional overwrite: once the
/// target is uninhibited and charging (or the other battery already holds
/// the inhibit), re-running it produces nothing, keeping repeated passes
/// from hammering the device.
pub(crate) fn ensure_charging(state: &SystemState, target: BatteryId) -> Vec<ControlWrite> {
    let tgt = state.battery(target);
    let other = state.battery(target.other());

    if tgt.is_charge_inhibited() || (!tgt.is_charging() && !other.is_charge_inhibited()) {
        vec![
            ControlWrite::inhibit_charge(target, 0),
            ControlWrite::inhibit_charge(target.other(), 1),
        ]
    } else {
        Vec::new()
    }
}
