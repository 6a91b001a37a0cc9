// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bot lifecycle state and the status snapshot folded from events

use crate::credential::CredentialState;
use crate::event::{CycleSummary, Event};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle of the bot. Only the scheduler changes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotState {
    #[default]
    Idle,
    Initializing,
    Running,
    Waiting,
    Error,
}

impl fmt::Display for BotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BotState::Idle => "idle",
            BotState::Initializing => "initializing",
            BotState::Running => "running",
            BotState::Waiting => "waiting",
            BotState::Error => "error",
        };
        f.write_str(s)
    }
}

/// Last check-in result recorded for one credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub accepted: bool,
    pub already_done: bool,
    pub skipped: bool,
    pub reward_amount: u64,
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialView {
    pub state: CredentialState,
    pub masked_identifier: Option<String>,
    pub last_result: Option<ResultView>,
}

/// What the dashboard renders from.
///
/// Built only by folding events with [`StatusSnapshot::apply`]; replaying the
/// same event sequence into a default snapshot always gives the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub bot_state: BotState,
    pub credential_count: usize,
    pub per_credential: BTreeMap<usize, CredentialView>,
    pub next_cycle_at: Option<DateTime<Utc>>,
    pub cycles_completed: u64,
    pub last_cycle: Option<CycleSummary>,
}

impl StatusSnapshot {
    /// Rebuild a snapshot from a full event sequence
    pub fn replay<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut snapshot = Self::default();
        for event in events {
            snapshot.apply(event);
        }
        snapshot
    }

    /// Fold one event into the snapshot
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::StatusUpdate {
                bot_state,
                credential_count,
                next_cycle_at,
            } => {
                self.bot_state = *bot_state;
                self.credential_count = *credential_count;
                self.next_cycle_at = *next_cycle_at;
            }

            Event::CredentialStatus {
                index,
                masked_identifier,
                state,
            } => {
                let view = self.per_credential.entry(*index).or_default();
                view.state = *state;
                view.masked_identifier = Some(masked_identifier.clone());
            }

            Event::CheckinResult {
                index,
                accepted,
                detail,
                reward_amount,
                already_done,
                skipped,
                credential_state,
            } => {
                let view = self.per_credential.entry(*index).or_default();
                view.state = *credential_state;
                view.last_result = Some(ResultView {
                    accepted: *accepted,
                    already_done: *already_done,
                    skipped: *skipped,
                    reward_amount: *reward_amount,
                    detail: detail.clone(),
                });
            }

            Event::CycleComplete { summary } => {
                self.cycles_completed += 1;
                self.last_cycle = Some(summary.clone());
            }

            Event::Log { .. } => {}
        }
    }

    /// Time left until the next cycle, clamped at zero
    pub fn time_until_next_cycle(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        self.next_cycle_at
            .map(|at| (at - now).to_std().unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
