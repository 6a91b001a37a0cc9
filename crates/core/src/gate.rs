// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential gate: decide whether a token is worth a network attempt
//!
//! Tokens are JWT-shaped (`header.payload.signature`). Only the payload's
//! `exp` claim is inspected; the signature is never verified.

use crate::clock::Clock;
use crate::credential::{Credential, CredentialState};
use crate::event::Event;
use crate::events::EventBus;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Decode the expiry instant embedded in a token, if there is a readable one
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    // Some issuers pad the segments anyway
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?;

    if let Some(secs) = exp.as_i64() {
        return DateTime::from_timestamp(secs, 0);
    }
    let secs = exp.as_f64()?;
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((secs * 1000.0) as i64)
}

/// Evaluate a token against `now` without side effects
pub fn state_at(token: &str, now: DateTime<Utc>) -> CredentialState {
    match expires_at(token) {
        None => CredentialState::Invalid,
        Some(exp) if now >= exp => CredentialState::Expired,
        Some(_) => CredentialState::Valid,
    }
}

/// Checks credential validity and reports unusable ones on the bus
#[derive(Clone)]
pub struct CredentialGate<C: Clock> {
    clock: C,
    bus: EventBus,
}

impl<C: Clock> CredentialGate<C> {
    pub fn new(clock: C, bus: EventBus) -> Self {
        Self { clock, bus }
    }

    /// Evaluate a credential. Never fails; undecodable tokens are `Invalid`.
    pub fn evaluate(&self, credential: &Credential) -> CredentialState {
        let state = state_at(credential.expose(), self.clock.utc_now());
        match state {
            CredentialState::Expired => {
                tracing::warn!(index = credential.index(), "credential expired");
                self.bus.publish(Event::warn(format!(
                    "account #{} ({}) token has expired",
                    credential.index() + 1,
                    credential.masked()
                )));
            }
            CredentialState::Invalid => {
                tracing::warn!(index = credential.index(), "credential invalid");
                self.bus.publish(Event::error(format!(
                    "account #{} ({}) token is invalid or unreadable",
                    credential.index() + 1,
                    credential.masked()
                )));
            }
            CredentialState::Valid | CredentialState::Unknown => {}
        }
        state
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
