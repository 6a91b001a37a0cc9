// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rc-core: domain model for the rollcall check-in bot
//!
//! This crate provides:
//! - Credentials and the gate that checks their embedded expiry
//! - The closed outcome taxonomy and the reply classifier
//! - Events, the event bus, and the status snapshot folded from them
//! - Clock abstraction and configuration

pub mod clock;
pub mod config;
pub mod credential;
pub mod event;
pub mod events;
pub mod gate;
pub mod outcome;
pub mod status;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{BotConfig, ConfigError};
pub use credential::{Credential, CredentialState};
pub use event::{CycleSummary, Event, LogLevel};
pub use events::{EventBus, EventLog, EventPattern, EventReceiver, SubscriberId, Subscription};
pub use gate::CredentialGate;
pub use outcome::{classify, Classified, Outcome, RawReply};
pub use status::{BotState, CredentialView, ResultView, StatusSnapshot};
