//! Startup error specs
//!
//! Configuration problems stop the process before the bot starts.

use crate::prelude::*;

#[test]
fn missing_endpoint_fails() {
    let temp = Project::empty();

    temp.rollcall()
        .args(["--once"])
        .fails()
        .stderr_has("no check-in endpoint configured");
}

#[test]
fn missing_config_file_fails() {
    let temp = Project::empty();

    temp.rollcall()
        .args(["--config", "absent.toml", "--once"])
        .fails()
        .stderr_has("failed to read config");
}

#[test]
fn malformed_config_file_fails() {
    let temp = Project::empty();
    temp.file("rollcall.toml", "cycle_interval = \"soon\"\n");

    temp.rollcall()
        .args(["--config", "rollcall.toml", "--once"])
        .fails()
        .stderr_has("failed to parse config");
}

#[test]
fn bad_duration_flag_fails() {
    let temp = Project::empty();

    temp.rollcall()
        .args(["--endpoint", DEAD_ENDPOINT, "--interval", "whenever"])
        .fails()
        .stderr_has("--interval");
}

#[test]
fn zero_tick_fails() {
    let temp = Project::empty();

    temp.rollcall()
        .args(["--endpoint", DEAD_ENDPOINT, "--tick", "0s"])
        .fails()
        .stderr_has("tick must be positive");
}

#[test]
fn oversized_interval_fails() {
    let temp = Project::empty();

    temp.rollcall()
        .args(["--endpoint", DEAD_ENDPOINT, "--interval", "1000000years"])
        .fails()
        .stderr_has("cycle_interval must be at most");
}
