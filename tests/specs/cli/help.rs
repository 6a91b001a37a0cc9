//! Help output specs

use crate::prelude::*;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_flags() {
    let temp = Project::empty();

    temp.rollcall()
        .args(["--help"])
        .passes()
        .stdout_has("--once")
        .stdout_has("--tokens")
        .stdout_has("--interval");
}

#[test]
fn version_prints_name() {
    Command::cargo_bin("rollcall")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rollcall "));
}
