//! Process log specs

use crate::prelude::*;

#[test]
fn bot_log_events_reach_the_log_file() {
    let temp = Project::empty();
    temp.file("tokens.txt", "");

    temp.rollcall()
        .args(["--endpoint", DEAD_ENDPOINT, "--once"])
        .passes();

    let log = temp.read_log();
    assert!(log.contains("starting rollcall"), "log:\n{}", log);
    assert!(log.contains("no credentials loaded"), "log:\n{}", log);
    assert!(log.contains("rollcall stopped"), "log:\n{}", log);
}

#[test]
fn tokens_never_appear_in_the_log_file() {
    let temp = Project::empty();
    temp.file("tokens.txt", &format!("{}\n", VALID_TOKEN));

    temp.rollcall()
        .args(["--endpoint", DEAD_ENDPOINT, "--once"])
        .passes();

    let log = temp.read_log();
    assert!(!log.is_empty());
    assert!(!log.contains(VALID_TOKEN), "log:\n{}", log);
    assert!(log.contains("eyJhbG…dXJl"), "log:\n{}", log);
}
