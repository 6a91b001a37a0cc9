// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-mode dashboard
//!
//! Prints every bus event as it arrives and, on a fixed tick, the current
//! status snapshot. The tick only reads the projection; it never computes
//! lifecycle state of its own.

use std::fmt::Write as _;
use std::io::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rc_core::{BotState, Event, EventReceiver, LogLevel, StatusSnapshot};
use rc_engine::StatusProjection;

pub const DASHBOARD_ID: &str = "dashboard";

pub struct Dashboard {
    projection: StatusProjection,
    json: bool,
    tick: Duration,
}

impl Dashboard {
    pub fn new(projection: StatusProjection, json: bool, tick: Duration) -> Self {
        Self {
            projection,
            json,
            tick,
        }
    }

    /// Render until the event channel closes, then print a final snapshot
    pub async fn run(self, mut events: EventReceiver) {
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.print_event(&event),
                    None => break,
                },
                _ = ticker.tick() => {
                    if !self.json {
                        emit(&render_snapshot(&self.projection.snapshot(), Utc::now()));
                    }
                }
            }
        }

        if !self.json {
            emit(&render_snapshot(&self.projection.snapshot(), Utc::now()));
        }
    }

    fn print_event(&self, event: &Event) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => emit(&line),
                Err(e) => tracing::warn!(error = %e, "could not serialize event"),
            }
        } else if let Event::Log { level, message } = event {
            emit(&render_log(*level, message));
        }
    }
}

fn emit(text: &str) {
    let mut out = std::io::stdout().lock();
    // A closed stdout is not worth crashing over
    let _ = writeln!(out, "{}", text);
    let _ = out.flush();
}

pub fn glyph(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Info => "ℹ",
        LogLevel::Success => "✔",
        LogLevel::Warn => "⚠",
        LogLevel::Error => "✖",
        LogLevel::Wait => "…",
    }
}

pub fn render_log(level: LogLevel, message: &str) -> String {
    format!("{} {}", glyph(level), message)
}

/// Multi-line snapshot: a header line, then one row per known credential
pub fn render_snapshot(snapshot: &StatusSnapshot, now: DateTime<Utc>) -> String {
    let mut out = format!(
        "── status: {} │ accounts: {} │ cycles: {}",
        snapshot.bot_state, snapshot.credential_count, snapshot.cycles_completed
    );

    if snapshot.bot_state == BotState::Waiting {
        if let Some(left) = snapshot.time_until_next_cycle(now) {
            let left = Duration::from_secs(left.as_secs());
            let _ = write!(out, " │ next check-in in {}", humantime::format_duration(left));
        }
    }

    for (index, view) in &snapshot.per_credential {
        let ident = view.masked_identifier.as_deref().unwrap_or("?");
        let last = match &view.last_result {
            None => "-".to_string(),
            Some(r) if r.skipped => format!("skipped ({})", r.detail),
            Some(r) if r.already_done => "already checked in".to_string(),
            Some(r) => r.detail.clone(),
        };
        let _ = write!(
            out,
            "\n   #{:<3} {:<16} {:<8} {}",
            index + 1,
            ident,
            view.state.as_str(),
            last
        );
    }
    out
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
