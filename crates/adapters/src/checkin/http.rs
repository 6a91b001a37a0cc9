// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP check-in adapter

use super::{CheckinAdapter, CheckinError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use ureq::Agent;

/// Posts to the check-in endpoint with the token as a bearer credential.
///
/// Runs the blocking request on tokio's blocking pool. Non-2xx statuses are
/// not errors here; their JSON bodies carry the application code.
#[derive(Clone)]
pub struct HttpCheckinAdapter {
    agent: Agent,
    endpoint: String,
}

impl HttpCheckinAdapter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: Agent::new_with_config(config),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CheckinAdapter for HttpCheckinAdapter {
    async fn attempt(&self, token: &str) -> Result<Value, CheckinError> {
        let agent = self.agent.clone();
        let url = self.endpoint.clone();
        let authorization = format!("Bearer {}", token.trim());

        tokio::task::spawn_blocking(move || {
            let mut response = agent
                .post(&url)
                .header("Authorization", &authorization)
                .header("Accept", "application/json")
                .send_empty()
                .map_err(request_error)?;
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(request_error)?;
            serde_json::from_str::<Value>(&body)
                .map_err(|e| CheckinError::MalformedBody(e.to_string()))
        })
        .await
        .map_err(|e| CheckinError::Aborted(e.to_string()))?
    }
}

fn request_error(error: ureq::Error) -> CheckinError {
    match error {
        ureq::Error::Timeout(_) => CheckinError::Timeout,
        other => CheckinError::Network(other.to_string()),
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
