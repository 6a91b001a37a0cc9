// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake check-in adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CheckinAdapter, CheckinError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinCall {
    pub token: String,
}

#[derive(Default)]
struct State {
    calls: Vec<CheckinCall>,
    /// Replies for specific tokens, consumed in order
    scripted: HashMap<String, VecDeque<Result<Value, CheckinError>>>,
    fallback: Option<Result<Value, CheckinError>>,
    latency: Duration,
}

/// Fake check-in adapter with scripted replies.
///
/// Without a script or fallback every attempt succeeds with a reward of 1.
#[derive(Clone, Default)]
pub struct FakeCheckinAdapter {
    state: Arc<Mutex<State>>,
}

impl FakeCheckinAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unscripted attempt with `reply`
    pub fn reply_with(self, reply: Result<Value, CheckinError>) -> Self {
        self.lock().fallback = Some(reply);
        self
    }

    /// Queue a reply for one token
    pub fn script(&self, token: &str, reply: Result<Value, CheckinError>) {
        self.lock()
            .scripted
            .entry(token.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Delay every attempt, to exercise timeouts and in-flight stops
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = latency;
        self
    }

    /// Get all recorded attempts
    pub fn calls(&self) -> Vec<CheckinCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CheckinAdapter for FakeCheckinAdapter {
    async fn attempt(&self, token: &str) -> Result<Value, CheckinError> {
        let (reply, latency) = {
            let mut state = self.lock();
            state.calls.push(CheckinCall {
                token: token.to_string(),
            });
            let reply = state
                .scripted
                .get_mut(token)
                .and_then(VecDeque::pop_front)
                .or_else(|| state.fallback.clone())
                .unwrap_or_else(|| Ok(json!({"code": 200, "reward": 1})));
            (reply, state.latency)
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        reply
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
