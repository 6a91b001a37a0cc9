// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the orchestration engine
//!
//! Per-credential failures never show up here; they are recovered inside the
//! cycle and reported as log events. These are faults in the machinery.

use rc_core::BotState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid bot transition: {from} -> {to}")]
    InvalidTransition { from: BotState, to: BotState },
    #[error("bot has faulted and cannot be restarted in this process")]
    Faulted,
    #[error("cannot schedule a cycle {0} from now")]
    ScheduleOverflow(String),
    #[error("orchestration task failed: {0}")]
    Task(String),
}
