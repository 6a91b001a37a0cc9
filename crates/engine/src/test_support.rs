// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for engine tests

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};

/// Fixed wall-clock reading used with `FakeClock::at`
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap()
}

pub fn token_expiring_at(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"user","exp":{}}}"#, exp));
    format!("{}.{}.sig", header, payload)
}

/// Valid for a week past `now()`
pub fn valid_token() -> String {
    token_expiring_at(now().timestamp() + 7 * 24 * 3600)
}

pub fn expired_token() -> String {
    token_expiring_at(now().timestamp() - 60)
}
