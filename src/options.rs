//! Turning arguments and the config file into validated runtime settings.
//! Arguments win over the config file, which wins over the defaults.

pub mod args;
pub mod config;
mod error;

use std::path::PathBuf;

pub use error::OptionError;
use error::OptionResult;

use crate::{
    collection::BatteryId,
    options::{args::BatshareArgs, config::Config},
    policy::{BalancePolicy, ChargeStrategy, DischargeStrategy},
};

const DEFAULT_DELAY_MS: u64 = 1000;
const MINIMUM_DELAY_MS: u64 = 100;

/// Everything the rest of the program needs to run, fully validated.
#[derive(Clone, Debug)]
pub struct Settings {
    pub delay_ms: u64,
    pub once: bool,
    pub dry_run: bool,
    pub debug: bool,
    pub smapi_dir: Option<PathBuf>,
    pub policy: BalancePolicy,
}

/// Merge arguments and config into [`Settings`], validating as we go.
pub fn build_settings(args: &BatshareArgs, config: &Config) -> OptionResult<Settings> {
    let general = config.general.clone().unwrap_or_default();
    let discharge = config.discharge.clone().unwrap_or_default();
    let charge = config.charge.clone().unwrap_or_default();
    let defaults = BalancePolicy::default();

    let delay_ms = args
        .general_args
        .delay
        .or(general.delay)
        .unwrap_or(DEFAULT_DELAY_MS);
    if delay_ms < MINIMUM_DELAY_MS {
        return Err(OptionError::other(
            "Please set your delay to be at least 100 milliseconds.",
        ));
    }

    let discharge_strategy = match args
        .policy_args
        .discharge_strategy
        .as_deref()
        .or(discharge.strategy.as_deref())
    {
        Some(raw) => parse_discharge_strategy(raw)?,
        None => defaults.discharge_strategy,
    };

    let charge_strategy = match args
        .policy_args
        .charge_strategy
        .as_deref()
        .or(charge.strategy.as_deref())
    {
        Some(raw) => parse_charge_strategy(raw)?,
        None => defaults.charge_strategy,
    };

    let discharge_leapfrog_threshold = validate_threshold(
        args.policy_args
            .discharge_leapfrog_threshold
            .or(discharge.leapfrog_threshold)
            .unwrap_or(defaults.discharge_leapfrog_threshold),
    )?;

    let charge_leapfrog_threshold = validate_threshold(
        args.policy_args
            .charge_leapfrog_threshold
            .or(charge.leapfrog_threshold)
            .unwrap_or(defaults.charge_leapfrog_threshold),
    )?;

    let charge_brackets = charge.brackets.unwrap_or(defaults.charge_brackets);
    validate_brackets(&charge_brackets)?;

    let preferred_battery = match args
        .policy_args
        .preferred_battery
        .or(charge.preferred_battery)
    {
        Some(0) => BatteryId::Bat0,
        Some(1) => BatteryId::Bat1,
        Some(other) => {
            return Err(OptionError::other(format!(
                "'{other}' is not a valid preferred battery, please use 0 or 1."
            )));
        }
        None => defaults.preferred_battery,
    };

    Ok(Settings {
        delay_ms,
        once: args.general_args.once,
        dry_run: args.general_args.dry_run,
        debug: args.general_args.debug,
        smapi_dir: args.general_args.smapi_dir.clone(),
        policy: BalancePolicy {
            discharge_strategy,
            discharge_leapfrog_threshold,
            charge_strategy,
            charge_leapfrog_threshold,
            charge_brackets,
            preferred_battery,
        },
    })
}

fn parse_discharge_strategy(raw: &str) -> OptionResult<DischargeStrategy> {
    match raw {
        "leapfrog" => Ok(DischargeStrategy::Leapfrog),
        "chasing" => Ok(DischargeStrategy::Chasing),
        "system" => Ok(DischargeStrategy::System),
        _ => Err(OptionError::other(format!(
            "'{raw}' is not a valid discharge strategy, please use 'leapfrog', 'chasing', or 'system'."
        ))),
    }
}

fn parse_charge_strategy(raw: &str) -> OptionResult<ChargeStrategy> {
    match raw {
        "leapfrog" => Ok(ChargeStrategy::Leapfrog),
        "chasing" => Ok(ChargeStrategy::Chasing),
        "brackets" => Ok(ChargeStrategy::Brackets),
        "system" => Ok(ChargeStrategy::System),
        _ => Err(OptionError::other(format!(
            "'{raw}' is not a valid charge strategy, please use 'leapfrog', 'chasing', 'brackets', or 'system'."
        ))),
    }
}

fn validate_threshold(threshold: u32) -> OptionResult<u32> {
    if threshold > 100 {
        Err(OptionError::other(format!(
            "'{threshold}' is not a valid leapfrog threshold, please use a percentage from 0 to 100."
        )))
    } else {
        Ok(threshold)
    }
}

fn validate_brackets(brackets: &[u32]) -> OptionResult<()> {
    if brackets.iter().any(|bracket| *bracket > 100) {
        return Err(OptionError::config(
            "Please keep your charge brackets between 0 and 100 percent.",
        ));
    }
    if brackets.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(OptionError::config(
            "Please set your charge brackets in strictly ascending order.",
        ));
    }
    Ok(())
}
