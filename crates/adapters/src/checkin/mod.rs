// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote check-in adapters

mod http;

pub use http::HttpCheckinAdapter;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CheckinCall, FakeCheckinAdapter};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failures that mean no usable reply was received
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckinError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("reply body is not JSON: {0}")]
    MalformedBody(String),
    #[error("request task failed: {0}")]
    Aborted(String),
}

/// Performs one check-in for one account against the remote service.
///
/// Returns the raw structured reply whatever its application code; judging
/// the reply is the classifier's job.
#[async_trait]
pub trait CheckinAdapter: Clone + Send + Sync + 'static {
    async fn attempt(&self, token: &str) -> Result<Value, CheckinError>;
}
