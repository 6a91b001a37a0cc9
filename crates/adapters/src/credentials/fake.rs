// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake credential source for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CredentialSource, SourceError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Serves a fixed token list, or fails every load
#[derive(Clone, Default)]
pub struct FakeCredentialSource {
    tokens: Option<Vec<String>>,
    loads: Arc<AtomicUsize>,
}

impl FakeCredentialSource {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: Some(tokens.into_iter().map(Into::into).collect()),
            loads: Arc::default(),
        }
    }

    /// A source whose every load fails
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl CredentialSource for FakeCredentialSource {
    fn load(&self) -> Result<Vec<String>, SourceError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .clone()
            .ok_or_else(|| SourceError::Unavailable("fake source configured to fail".into()))
    }

    fn describe(&self) -> String {
        "fake".to_string()
    }
}
