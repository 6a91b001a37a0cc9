// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Rollcall orchestration engine

mod bot;
mod error;
mod projection;
mod runner;
mod scheduler;

#[cfg(test)]
mod test_support;

pub use bot::{Bot, BotDeps, BotHandle, RunMode};
pub use error::EngineError;
pub use projection::StatusProjection;
pub use runner::CycleRunner;
pub use scheduler::{CycleTimer, Scheduler};
