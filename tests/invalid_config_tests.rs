//! These tests are for checking that config file mistakes produce
//! user-facing errors instead of silent misbehaviour.

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

fn get_binary_location() -> String {
    env!("CARGO_BIN_EXE_batshare").to_string()
}

#[test]
fn test_toml_mismatch_type() {
    Command::new(get_binary_location())
        .arg("-C")
        .arg("./tests/invalid_configs/toml_mismatch_type.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid type"));
}

#[test]
fn test_unknown_field() {
    Command::new(get_binary_location())
        .arg("-C")
        .arg("./tests/invalid_configs/unknown_field.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn test_descending_brackets() {
    Command::new(get_binary_location())
        .arg("-C")
        .arg("./tests/invalid_configs/descending_brackets.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ascending order"));
}

#[test]
fn test_invalid_strategy() {
    Command::new(get_binary_location())
        .arg("-C")
        .arg("./tests/invalid_configs/invalid_strategy.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid charge strategy"));
}
