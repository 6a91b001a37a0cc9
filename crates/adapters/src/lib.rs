// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the bot's external collaborators

pub mod checkin;
pub mod credentials;
pub mod traced;

pub use checkin::{CheckinAdapter, CheckinError, HttpCheckinAdapter};
pub use credentials::{CredentialSource, FileCredentialSource, SourceError};
pub use traced::{TracedCheckinAdapter, TracedCredentialSource};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use checkin::{CheckinCall, FakeCheckinAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use credentials::FakeCredentialSource;
