//! End-to-end tests driving a single balance pass against a fake sysfs
//! tree.

mod util;

use std::{fs, process::Command};

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;
use util::{fake_smapi_tree, FakeBattery};

fn get_binary_location() -> String {
    env!("CARGO_BIN_EXE_batshare").to_string()
}

/// A single `--once` pass against the given smapi tree, with the config
/// kept inside the scratch directory.
fn single_pass(dir: &TempDir) -> Command {
    let mut command = Command::new(get_binary_location());
    command
        .arg("-C")
        .arg(dir.path().join("batshare.toml"))
        .arg("--smapi-dir")
        .arg(dir.path().join("smapi"))
        .arg("--once");
    command
}

fn read_prop(dir: &TempDir, battery: &str, prop: &str) -> String {
    fs::read_to_string(dir.path().join("smapi").join(battery).join(prop)).unwrap()
}

#[test]
fn chasing_discharge_forces_the_fuller_battery() {
    let dir = TempDir::new().unwrap();
    let smapi = dir.path().join("smapi");
    fs::create_dir(&smapi).unwrap();
    fake_smapi_tree(
        &smapi,
        false,
        &FakeBattery::idle_at(60),
        &FakeBattery::idle_at(40),
    );

    single_pass(&dir)
        .arg("--discharge-strategy")
        .arg("chasing")
        .arg("--charge-strategy")
        .arg("system")
        .assert()
        .success();

    assert_eq!(read_prop(&dir, "BAT0", "force_discharge"), "1");
    // Only the delta gets written: BAT1's flag was already clear.
    assert_eq!(read_prop(&dir, "BAT1", "force_discharge"), "0\n");
}

#[test]
fn ac_power_clears_stale_forced_flags() {
    let dir = TempDir::new().unwrap();
    let smapi = dir.path().join("smapi");
    fs::create_dir(&smapi).unwrap();
    let mut bat0 = FakeBattery::idle_at(60);
    bat0.force_discharge = true;
    fake_smapi_tree(&smapi, true, &bat0, &FakeBattery::idle_at(40));

    single_pass(&dir)
        .arg("--discharge-strategy")
        .arg("chasing")
        .arg("--charge-strategy")
        .arg("system")
        .assert()
        .success();

    assert_eq!(read_prop(&dir, "BAT0", "force_discharge"), "0");
}

#[test]
fn brackets_charge_inhibits_the_unpreferred_battery() {
    let dir = TempDir::new().unwrap();
    let smapi = dir.path().join("smapi");
    fs::create_dir(&smapi).unwrap();
    fake_smapi_tree(
        &smapi,
        true,
        &FakeBattery::idle_at(15),
        &FakeBattery::idle_at(60),
    );

    single_pass(&dir)
        .arg("--discharge-strategy")
        .arg("system")
        .arg("--charge-strategy")
        .arg("brackets")
        .arg("--preferred-battery")
        .arg("0")
        .assert()
        .success();

    // The preferred battery at 15% is under the 20% bracket: it gets the
    // charge, the other bay gets the inhibit.
    assert_eq!(read_prop(&dir, "BAT0", "inhibit_charge_minutes"), "0");
    assert_eq!(read_prop(&dir, "BAT1", "inhibit_charge_minutes"), "1");
}

#[test]
fn dry_run_logs_without_writing() {
    let dir = TempDir::new().unwrap();
    let smapi = dir.path().join("smapi");
    fs::create_dir(&smapi).unwrap();
    fake_smapi_tree(
        &smapi,
        false,
        &FakeBattery::idle_at(60),
        &FakeBattery::idle_at(40),
    );

    single_pass(&dir)
        .arg("--dry-run")
        .arg("--discharge-strategy")
        .arg("chasing")
        .arg("--charge-strategy")
        .arg("system")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "would set BAT0/force_discharge => 1",
        ));

    assert_eq!(read_prop(&dir, "BAT0", "force_discharge"), "0\n");
}

#[test]
fn a_missing_battery_stops_all_balancing() {
    let dir = TempDir::new().unwrap();
    let smapi = dir.path().join("smapi");
    fs::create_dir(&smapi).unwrap();
    let mut bat1 = FakeBattery::idle_at(40);
    bat1.installed = false;
    bat1.inhibit_charge_minutes = 5;
    fake_smapi_tree(&smapi, true, &FakeBattery::idle_at(60), &bat1);

    single_pass(&dir)
        .arg("--charge-strategy")
        .arg("chasing")
        .assert()
        .success();

    // The stale inhibit is cleared, and nothing new is forced or inhibited.
    assert_eq!(read_prop(&dir, "BAT1", "inhibit_charge_minutes"), "0");
    assert_eq!(read_prop(&dir, "BAT0", "force_discharge"), "0\n");
    assert_eq!(read_prop(&dir, "BAT0", "inhibit_charge_minutes"), "0\n");
}
