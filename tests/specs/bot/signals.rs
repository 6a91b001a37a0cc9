//! Shutdown specs
//!
//! SIGINT and SIGTERM stop a continuous run: the bot goes idle and the
//! process exits successfully.

use crate::prelude::*;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use serde_json::Value;
use std::io::{BufRead, BufReader};
use std::sync::mpsc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(30);

/// Forward stdout lines parsed as JSON events over a channel
fn event_lines(child: &mut std::process::Child) -> mpsc::Receiver<Value> {
    let stdout = child.stdout.take().unwrap();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else { break };
            if let Ok(event) = serde_json::from_str::<Value>(&line) {
                if tx.send(event).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

fn is_status(event: &Value, state: &str) -> bool {
    event["type"] == "statusUpdate" && event["botState"] == state
}

fn stop_with(signal: Signal) {
    let temp = Project::empty();
    temp.file("tokens.txt", &format!("{}\n", VALID_TOKEN));

    let mut child = temp.spawn_rollcall(&[
        "--endpoint",
        DEAD_ENDPOINT,
        "--interval",
        "24h",
        "--json",
    ]);
    let events = event_lines(&mut child);

    // Signal only once the bot has settled into its wait
    loop {
        let event = events.recv_timeout(WAIT).unwrap();
        if is_status(&event, "Waiting") {
            break;
        }
    }

    kill(Pid::from_raw(child.id() as i32), signal).unwrap();
    let status = child.wait().unwrap();
    let rest: Vec<Value> = events.iter().collect();

    assert!(status.success(), "exit status: {:?}", status);
    let last = rest.last().unwrap();
    assert!(is_status(last, "Idle"), "last event: {}", last);
    assert!(last["nextCycleAt"].is_null());
}

#[test]
fn sigint_while_waiting_goes_idle_and_exits_cleanly() {
    stop_with(Signal::SIGINT);
}

#[test]
fn sigterm_while_waiting_goes_idle_and_exits_cleanly() {
    stop_with(Signal::SIGTERM);
}
