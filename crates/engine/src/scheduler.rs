// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bot lifecycle state machine and cycle timer
//!
//! The scheduler is the only writer of [`BotState`]. Every transition
//! publishes a `statusUpdate` carrying the lifecycle fields of the snapshot.
//!
//! ```text
//! Idle -> Initializing -> Running -> Waiting -> Running -> ... -> Idle
//!                  (any) -> Error
//! ```

use crate::error::EngineError;
use chrono::{DateTime, Utc};
use rc_core::{BotState, Clock, Event, EventBus};
use std::time::{Duration, Instant};

/// The one-shot timer guarding the next cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTimer {
    pub id: u64,
    pub fire_at: Instant,
    pub duration: Duration,
}

pub struct Scheduler<C: Clock> {
    clock: C,
    bus: EventBus,
    interval: Duration,
    state: BotState,
    credential_count: usize,
    next_cycle_at: Option<DateTime<Utc>>,
    timer: Option<CycleTimer>,
    next_timer_id: u64,
    faulted: bool,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C, bus: EventBus, interval: Duration) -> Self {
        Self {
            clock,
            bus,
            interval,
            state: BotState::Idle,
            credential_count: 0,
            next_cycle_at: None,
            timer: None,
            next_timer_id: 1,
            faulted: false,
        }
    }

    pub fn state(&self) -> BotState {
        self.state
    }

    pub fn credential_count(&self) -> usize {
        self.credential_count
    }

    pub fn next_cycle_at(&self) -> Option<DateTime<Utc>> {
        self.next_cycle_at
    }

    pub fn timer(&self) -> Option<&CycleTimer> {
        self.timer.as_ref()
    }

    /// Number of armed timers; never more than one
    pub fn pending_timers(&self) -> usize {
        usize::from(self.timer.is_some())
    }

    /// `Idle -> Initializing`
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.faulted {
            return Err(EngineError::Faulted);
        }
        self.expect_state(&[BotState::Idle], BotState::Initializing)?;
        self.transition(BotState::Initializing);
        Ok(())
    }

    /// Record how many credentials were loaded
    pub fn set_credential_count(&mut self, count: usize) {
        self.credential_count = count;
        self.publish_status();
    }

    /// `Initializing | Waiting -> Running`. Consumes the armed timer.
    pub fn begin_cycle(&mut self) -> Result<(), EngineError> {
        self.expect_state(
            &[BotState::Initializing, BotState::Waiting],
            BotState::Running,
        )?;
        self.timer = None;
        self.next_cycle_at = None;
        self.transition(BotState::Running);
        Ok(())
    }

    /// `Running -> Waiting`, arming the timer for the next cycle.
    ///
    /// Returns `None` when the bot was stopped while the cycle ran; a late
    /// finishing cycle never brings a stopped bot back.
    pub fn finish_cycle(&mut self) -> Result<Option<CycleTimer>, EngineError> {
        if self.state == BotState::Idle {
            tracing::debug!("cycle finished after stop, not rescheduling");
            return Ok(None);
        }
        self.expect_state(&[BotState::Running], BotState::Waiting)?;

        let next_cycle_at = chrono::Duration::from_std(self.interval)
            .ok()
            .and_then(|wait| self.clock.utc_now().checked_add_signed(wait))
            .ok_or_else(|| overflow(self.interval))?;
        let timer = self.arm(self.interval)?;
        self.next_cycle_at = Some(next_cycle_at);
        self.transition(BotState::Waiting);
        Ok(Some(timer))
    }

    /// Arm the cycle timer, replacing any timer already armed
    pub fn arm(&mut self, duration: Duration) -> Result<CycleTimer, EngineError> {
        let fire_at = self
            .clock
            .now()
            .checked_add(duration)
            .ok_or_else(|| overflow(duration))?;
        if let Some(previous) = &self.timer {
            tracing::warn!(timer = previous.id, "replacing armed cycle timer");
        }
        let timer = CycleTimer {
            id: self.next_timer_id,
            fire_at,
            duration,
        };
        self.next_timer_id += 1;
        self.timer = Some(timer.clone());
        Ok(timer)
    }

    /// Go `Idle` from any state, disarming the timer. No-op when already idle.
    pub fn stop(&mut self) {
        if self.state == BotState::Idle && self.timer.is_none() && self.next_cycle_at.is_none() {
            return;
        }
        self.timer = None;
        self.next_cycle_at = None;
        self.transition(BotState::Idle);
    }

    /// Enter `Error` after an unrecoverable fault. The bot cannot be started
    /// again by this scheduler.
    pub fn fail(&mut self, reason: &str) {
        self.faulted = true;
        self.timer = None;
        self.next_cycle_at = None;
        tracing::error!(reason, "bot faulted");
        self.bus.publish(Event::error(format!("fatal: {}", reason)));
        self.transition(BotState::Error);
    }

    fn expect_state(&self, allowed: &[BotState], to: BotState) -> Result<(), EngineError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(EngineError::InvalidTransition {
                from: self.state,
                to,
            })
        }
    }

    fn transition(&mut self, to: BotState) {
        tracing::info!(from = %self.state, to = %to, "bot state");
        self.state = to;
        self.publish_status();
    }

    fn publish_status(&self) {
        self.bus.publish(Event::StatusUpdate {
            bot_state: self.state,
            credential_count: self.credential_count,
            next_cycle_at: self.next_cycle_at,
        });
    }
}

fn overflow(duration: Duration) -> EngineError {
    EngineError::ScheduleOverflow(humantime::format_duration(duration).to_string())
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
