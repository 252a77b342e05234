#![warn(rust_2018_idioms)]

use anyhow::{Context, Result};
use batshare::{
    options::{args::BatshareArgs, build_settings, config},
    utils::logging,
};
use clap::Parser;

fn main() -> Result<()> {
    let args = BatshareArgs::parse();

    let config_path = config::config_path(args.general_args.config_location.as_deref());
    let config = config::create_or_get_config(&config_path)
        .context("Unable to properly parse or create the config file.")?;

    let settings = build_settings(&args, &config)?;

    let min_level = if settings.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logging::init_logger(min_level, None).context("Unable to initialize the logger.")?;

    batshare::run(&settings)
}
