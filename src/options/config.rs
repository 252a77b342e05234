//! The TOML config file.

use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use indoc::indoc;
use serde::Deserialize;

/// Location of the config file relative to the user's config directory.
const DEFAULT_CONFIG_FILE_PATH: &str = "batshare/batshare.toml";

/// Written out on first run so there is something to edit.
const DEFAULT_CONFIG_CONTENT: &str = indoc! {r##"
    # This is batshare's config file. All fields are optional; the values
    # shown commented out are the defaults.

    [general]
    # Time in milliseconds between balance passes.
    #delay = 1000

    [discharge]
    # One of "leapfrog", "chasing", or "system".
    #strategy = "leapfrog"
    # Percentage-point gap that justifies switching the discharging battery.
    #leapfrog_threshold = 5

    [charge]
    # One of "leapfrog", "chasing", "brackets", or "system".
    #strategy = "brackets"
    # Percentage-point gap that justifies switching the charging battery.
    #leapfrog_threshold = 10
    # Ascending percent thresholds for the brackets strategy.
    #brackets = [10, 20, 80, 90, 95, 100]
    # The battery (0 or 1) given priority by the brackets strategy.
    #preferred_battery = 0
"##};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) general: Option<GeneralConfig>,
    pub(crate) discharge: Option<DischargeConfig>,
    pub(crate) charge: Option<ChargeConfig>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GeneralConfig {
    pub(crate) delay: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DischargeConfig {
    pub(crate) strategy: Option<String>,
    pub(crate) leapfrog_threshold: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ChargeConfig {
    pub(crate) strategy: Option<String>,
    pub(crate) leapfrog_threshold: Option<u32>,
    pub(crate) brackets: Option<Vec<u32>>,
    pub(crate) preferred_battery: Option<u8>,
}

/// Resolve the config file path: an explicit location wins, otherwise the
/// platform config directory. `None` means there is nowhere sensible to put
/// one and defaults are used without persisting anything.
pub fn config_path(config_location: Option<&std::path::Path>) -> Option<PathBuf> {
    if let Some(location) = config_location {
        Some(location.to_path_buf())
    } else {
        dirs::config_dir().map(|path| path.join(DEFAULT_CONFIG_FILE_PATH))
    }
}

/// Read the config file, creating it with the default template if it does
/// not exist yet.
pub fn create_or_get_config(config_path: &Option<PathBuf>) -> Result<Config> {
    if let Some(path) = config_path {
        if let Ok(config_string) = fs::read_to_string(path) {
            toml_edit::de::from_str(config_string.as_str())
                .with_context(|| format!("Failed to parse config file at '{}'.", path.display()))
        } else {
            if let Some(parent_path) = path.parent() {
                fs::create_dir_all(parent_path)?;
            }
            fs::File::create(path)?.write_all(DEFAULT_CONFIG_CONTENT.as_bytes())?;
            Ok(Config::default())
        }
    } else {
        Ok(Config::default())
    }
}
