// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential sources

mod file;

pub use file::FileCredentialSource;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeCredentialSource;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to parse {0}: {1}")]
    Parse(PathBuf, String),
    #[error("{0}")]
    Unavailable(String),
}

/// Loads the ordered list of raw tokens, one per account
pub trait CredentialSource: Send + Sync + 'static {
    fn load(&self) -> Result<Vec<String>, SourceError>;

    /// Human-readable origin, for log lines
    fn describe(&self) -> String;
}
