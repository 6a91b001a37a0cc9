// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability
//!
//! Tokens only ever appear masked in spans and log fields.

use crate::checkin::{CheckinAdapter, CheckinError};
use crate::credentials::{CredentialSource, SourceError};
use async_trait::async_trait;
use rc_core::credential::mask;
use serde_json::Value;
use tracing::Instrument;

/// Wrapper that adds tracing to any CheckinAdapter
#[derive(Clone)]
pub struct TracedCheckinAdapter<A> {
    inner: A,
}

impl<A> TracedCheckinAdapter<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: CheckinAdapter> CheckinAdapter for TracedCheckinAdapter<A> {
    async fn attempt(&self, token: &str) -> Result<Value, CheckinError> {
        let span = tracing::info_span!("checkin.attempt", token = %mask(token));

        async {
            tracing::debug!("sending");
            let start = std::time::Instant::now();
            let result = self.inner.attempt(token).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(reply) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    code = ?reply.get("code"),
                    "reply received"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "attempt failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any CredentialSource
pub struct TracedCredentialSource<S> {
    inner: S,
}

impl<S> TracedCredentialSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: CredentialSource> CredentialSource for TracedCredentialSource<S> {
    fn load(&self) -> Result<Vec<String>, SourceError> {
        let span = tracing::info_span!("credentials.load", source = %self.inner.describe());
        let _guard = span.enter();

        let result = self.inner.load();
        match &result {
            Ok(tokens) => tracing::info!(count = tokens.len(), "credentials loaded"),
            Err(e) => tracing::error!(error = %e, "credential load failed"),
        }
        result
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
