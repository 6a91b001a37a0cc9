// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events published by the orchestration engine
//!
//! This is the whole contract presentation subscribes to. Events are
//! immutable once published and the status snapshot is a fold over them.

use crate::credential::CredentialState;
use crate::outcome::Outcome;
use crate::status::BotState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a user-visible log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
    Wait,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Wait => "wait",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Totals for one finished (or cancelled) cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSummary {
    pub total: usize,
    pub accepted: usize,
    pub already_done: usize,
    pub failed: usize,
    pub skipped: usize,
    pub reward_total: u64,
    pub cancelled: bool,
}

impl CycleSummary {
    /// Credentials that reached a result (attempted or skipped)
    pub fn processed(&self) -> usize {
        self.accepted + self.failed + self.skipped
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    #[serde(rename_all = "camelCase")]
    Log { level: LogLevel, message: String },

    #[serde(rename_all = "camelCase")]
    StatusUpdate {
        bot_state: BotState,
        credential_count: usize,
        next_cycle_at: Option<DateTime<Utc>>,
    },

    #[serde(rename_all = "camelCase")]
    CredentialStatus {
        index: usize,
        masked_identifier: String,
        state: CredentialState,
    },

    #[serde(rename_all = "camelCase")]
    CheckinResult {
        index: usize,
        accepted: bool,
        detail: String,
        reward_amount: u64,
        already_done: bool,
        /// Set when the credential gate short-circuited the attempt
        skipped: bool,
        /// Gate verdict the result was reached under
        credential_state: CredentialState,
    },

    #[serde(rename_all = "camelCase")]
    CycleComplete { summary: CycleSummary },
}

impl Event {
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Event::Log {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Error, message)
    }

    /// Result of an attempted check-in
    pub fn attempted(index: usize, outcome: &Outcome) -> Self {
        Event::CheckinResult {
            index,
            accepted: outcome.accepted(),
            detail: outcome.detail().to_string(),
            reward_amount: outcome.reward_amount(),
            already_done: outcome.already_done(),
            skipped: false,
            credential_state: CredentialState::Valid,
        }
    }

    /// Result for a credential the gate refused
    pub fn skipped(index: usize, state: CredentialState) -> Self {
        Event::CheckinResult {
            index,
            accepted: false,
            detail: state.as_str().to_string(),
            reward_amount: 0,
            already_done: false,
            skipped: true,
            credential_state: state,
        }
    }

    /// Name used for subscription pattern matching, e.g. `log:warn`
    pub fn name(&self) -> String {
        match self {
            Event::Log { level, .. } => format!("log:{}", level),
            Event::StatusUpdate { .. } => "status:update".to_string(),
            Event::CredentialStatus { .. } => "credential:status".to_string(),
            Event::CheckinResult { .. } => "checkin:result".to_string(),
            Event::CycleComplete { .. } => "cycle:complete".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
