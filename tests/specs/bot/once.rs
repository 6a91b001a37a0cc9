//! Single-cycle specs
//!
//! `--once` runs one cycle over the token file and exits.

use crate::prelude::*;

#[test]
fn empty_token_file_warns_and_exits_cleanly() {
    let temp = Project::empty();
    temp.file("tokens.txt", "# no accounts yet\n");

    temp.rollcall()
        .args(["--endpoint", DEAD_ENDPOINT, "--once"])
        .passes()
        .stdout_has("⚠ no credentials loaded, nothing to check in")
        .stdout_has("status: idle");
}

#[test]
fn missing_token_file_is_reported_not_fatal() {
    let temp = Project::empty();

    temp.rollcall()
        .args(["--endpoint", DEAD_ENDPOINT, "--tokens", "nowhere.txt", "--once"])
        .passes()
        .stdout_has("✖ could not load credentials")
        .stdout_has("no credentials loaded");
}

#[test]
fn expired_token_is_skipped() {
    let temp = Project::empty();
    temp.file("tokens.txt", &format!("{}\n", EXPIRED_TOKEN));

    temp.rollcall()
        .args(["--endpoint", DEAD_ENDPOINT, "--once"])
        .passes()
        .stdout_has("token has expired")
        .stdout_has("1 skipped")
        .stdout_lacks("transport error");
}

#[test]
fn unreachable_endpoint_fails_the_account_not_the_run() {
    let temp = Project::empty();
    temp.file("tokens.json", &format!("[\"{}\", \"not-a-token\"]", VALID_TOKEN));

    temp.rollcall()
        .args(["--endpoint", DEAD_ENDPOINT, "--tokens", "tokens.json", "--once"])
        .passes()
        .stdout_has("account #1: transport error")
        .stdout_has("token is invalid")
        .stdout_has("1 failed, 1 skipped");
}

#[test]
fn json_mode_prints_event_lines() {
    let temp = Project::empty();
    temp.file("tokens.txt", "");

    let run = temp
        .rollcall()
        .args(["--endpoint", DEAD_ENDPOINT, "--once", "--json"])
        .passes();

    let events: Vec<serde_json::Value> = run
        .stdout()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.first().unwrap()["type"], "statusUpdate");
    assert_eq!(events.first().unwrap()["botState"], "Initializing");
    let last = events.last().unwrap();
    assert_eq!(last["type"], "statusUpdate");
    assert_eq!(last["botState"], "Idle");
    assert!(events.iter().any(|e| e["type"] == "cycleComplete"));
}
