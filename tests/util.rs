use std::{fs, path::Path};

/// One battery's worth of fake sysfs properties.
pub struct FakeBattery {
    pub installed: bool,
    pub force_discharge: bool,
    pub inhibit_charge_minutes: u32,
    pub remaining_percent: u32,
    pub state: &'static str,
}

impl FakeBattery {
    pub fn idle_at(remaining_percent: u32) -> Self {
        FakeBattery {
            installed: true,
            force_discharge: false,
            inhibit_charge_minutes: 0,
            remaining_percent,
            state: "idle",
        }
    }
}

/// Lay out a scratch directory mimicking `/sys/devices/platform/smapi`.
pub fn fake_smapi_tree(dir: &Path, ac_connected: bool, bat0: &FakeBattery, bat1: &FakeBattery) {
    fs::write(
        dir.join("ac_connected"),
        format!("{}\n", ac_connected as u32),
    )
    .unwrap();
    write_battery(dir, "BAT0", bat0);
    write_battery(dir, "BAT1", bat1);
}

fn write_battery(dir: &Path, name: &str, battery: &FakeBattery) {
    let bat_dir = dir.join(name);
    fs::create_dir_all(&bat_dir).unwrap();
    fs::write(
        bat_dir.join("installed"),
        format!("{}\n", battery.installed as u32),
    )
    .unwrap();
    fs::write(
        bat_dir.join("force_discharge"),
        format!("{}\n", battery.force_discharge as u32),
    )
    .unwrap();
    fs::write(
        bat_dir.join("inhibit_charge_minutes"),
        format!("{}\n", battery.inhibit_charge_minutes),
    )
    .unwrap();
    fs::write(
        bat_dir.join("remaining_percent"),
        format!("{}\n", battery.remaining_percent),
    )
    .unwrap();
    fs::write(bat_dir.join("power_avg"), "0\n").unwrap();
    fs::write(bat_dir.join("state"), format!("{}\n", battery.state)).unwrap();
}
