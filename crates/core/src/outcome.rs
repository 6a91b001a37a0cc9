// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Classification of remote check-in replies
//!
//! The remote service signals "already checked in today" with a zero reward
//! on an otherwise successful reply, not with a distinct error code.

use crate::event::LogLevel;
use serde::Serialize;
use serde_json::Value;

/// Application code the remote service uses for success
pub const SUCCESS_CODE: i64 = 200;

/// What the remote-attempt collaborator handed back
#[derive(Debug, Clone, PartialEq)]
pub enum RawReply {
    /// No reply was received (network error, timeout, undecodable body)
    Transport(String),
    /// A structured reply, not yet validated
    Reply(Value),
}

/// Result of one check-in attempt.
///
/// Only constructible through the classifier's constructors, which keep
/// `reward_amount == 0` whenever `already_done` is set or `accepted` is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    accepted: bool,
    already_done: bool,
    reward_amount: u64,
    detail: String,
}

impl Outcome {
    pub fn transport_error() -> Self {
        Self::rejected("transport error")
    }

    pub fn rejected(detail: impl Into<String>) -> Self {
        Self {
            accepted: false,
            already_done: false,
            reward_amount: 0,
            detail: detail.into(),
        }
    }

    /// Accepted with a reward; a zero reward means already done
    pub fn rewarded(reward_amount: u64) -> Self {
        if reward_amount == 0 {
            return Self::already_checked_in();
        }
        Self {
            accepted: true,
            already_done: false,
            reward_amount,
            detail: format!("+{} points", reward_amount),
        }
    }

    pub fn already_checked_in() -> Self {
        Self {
            accepted: true,
            already_done: true,
            reward_amount: 0,
            detail: "already checked in".to_string(),
        }
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn already_done(&self) -> bool {
        self.already_done
    }

    pub fn reward_amount(&self) -> u64 {
        self.reward_amount
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// An outcome plus how it should be reported
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub outcome: Outcome,
    pub level: LogLevel,
    pub message: String,
}

/// Classify a raw reply. Rules are evaluated in order; the first match wins.
pub fn classify(reply: &RawReply) -> Classified {
    let value = match reply {
        RawReply::Transport(reason) => return transport(reason),
        RawReply::Reply(value) => value,
    };

    let Some(body) = value.as_object() else {
        return transport("reply is not an object");
    };
    let Some(code) = body.get("code").and_then(Value::as_i64) else {
        return transport("reply has no integer code");
    };

    if code != SUCCESS_CODE {
        let message = body
            .get("message")
            .or_else(|| body.get("msg"))
            .and_then(Value::as_str)
            .unwrap_or("no message");
        let outcome = Outcome::rejected(format!("code {}: {}", code, message));
        return Classified {
            message: format!("check-in rejected ({})", outcome.detail()),
            outcome,
            level: LogLevel::Error,
        };
    }

    let reward = match reward_of(body) {
        Ok(reward) => reward,
        Err(reason) => return transport(reason),
    };
    let outcome = Outcome::rewarded(reward);
    if outcome.already_done() {
        Classified {
            message: "already checked in today".to_string(),
            outcome,
            level: LogLevel::Warn,
        }
    } else {
        Classified {
            message: format!("check-in succeeded, {}", outcome.detail()),
            outcome,
            level: LogLevel::Success,
        }
    }
}

/// Top-level `reward`, falling back to `data.reward`; absent means zero
fn reward_of(body: &serde_json::Map<String, Value>) -> Result<u64, &'static str> {
    let raw = body
        .get("reward")
        .or_else(|| body.get("data").and_then(|data| data.get("reward")));
    match raw {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value.as_u64().ok_or("reward is not a non-negative integer"),
    }
}

fn transport(reason: &str) -> Classified {
    Classified {
        outcome: Outcome::transport_error(),
        level: LogLevel::Error,
        message: format!("transport error: {}", reason),
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
