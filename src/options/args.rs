//! Argument parsing via clap.

use std::path::PathBuf;

use clap::*;
use indoc::indoc;

const TEMPLATE: &str = indoc! {
    "{name} {version}
    {author}

    {about}

    {usage-heading} {usage}

    {all-args}"
};

const USAGE: &str = "batshare [OPTIONS]";

/// The arguments for batshare.
#[derive(Parser, Debug)]
#[command(
    name = crate_name!(),
    version = crate_version!(),
    author = crate_authors!(),
    about = crate_description!(),
    color = ColorChoice::Auto,
    help_template = TEMPLATE,
    override_usage = USAGE,
)]
pub struct BatshareArgs {
    #[command(flatten)]
    pub general_args: GeneralArgs,

    #[command(flatten)]
    pub policy_args: PolicyArgs,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "General Options")]
pub struct GeneralArgs {
    #[arg(
        short = 'C',
        long = "config",
        value_name = "PATH",
        help = "Sets the location of the config file.",
        long_help = "Sets the location of the config file. Expects a config file in the TOML format. \
                    If it doesn't exist, one is created with the default settings."
    )]
    pub config_location: Option<PathBuf>,

    #[arg(
        short = 'd',
        long = "delay",
        value_name = "MS",
        help = "Sets the time in milliseconds between balance passes.",
        long_help = "Sets the time in milliseconds between balance passes. The minimum is 100 \
                    milliseconds, and the default is 1000 milliseconds."
    )]
    pub delay: Option<u64>,

    #[arg(
        long = "once",
        help = "Runs a single balance pass and exits.",
        long_help = "Runs a single balance pass and exits instead of polling forever. Useful from \
                    cron or for inspecting what the policy would do right now."
    )]
    pub once: bool,

    #[arg(
        long = "dry-run",
        help = "Logs the writes a pass would issue without touching the device."
    )]
    pub dry_run: bool,

    #[arg(
        long = "smapi-dir",
        value_name = "PATH",
        help = "Overrides the tp_smapi sysfs directory.",
        long_help = "Overrides the tp_smapi sysfs directory. Defaults to /sys/devices/platform/smapi; \
                    mostly useful for testing against a fake sysfs tree."
    )]
    pub smapi_dir: Option<PathBuf>,

    #[arg(long = "debug", help = "Enables debug logging.")]
    pub debug: bool,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Policy Options")]
pub struct PolicyArgs {
    #[arg(
        long = "discharge-strategy",
        value_name = "STRATEGY",
        help = "Sets the discharge strategy ('leapfrog', 'chasing', or 'system')."
    )]
    pub discharge_strategy: Option<String>,

    #[arg(
        long = "charge-strategy",
        value_name = "STRATEGY",
        help = "Sets the charge strategy ('leapfrog', 'chasing', 'brackets', or 'system')."
    )]
    pub charge_strategy: Option<String>,

    #[arg(
        long = "discharge-leapfrog-threshold",
        value_name = "PERCENT",
        help = "Percentage-point gap that justifies switching the discharging battery."
    )]
    pub discharge_leapfrog_threshold: Option<u32>,

    #[arg(
        long = "charge-leapfrog-threshold",
        value_name = "PERCENT",
        help = "Percentage-point gap that justifies switching the charging battery."
    )]
    pub charge_leapfrog_threshold: Option<u32>,

    #[arg(
        long = "preferred-battery",
        value_name = "BAT",
        help = "Sets the battery (0 or 1) given priority by the brackets strategy."
    )]
    pub preferred_battery: Option<u8>,
}
