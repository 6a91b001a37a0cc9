// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bot driver: wires the credential source, runner and scheduler together
//! and runs the cycle loop on a background task.

use crate::error::EngineError;
use crate::runner::CycleRunner;
use crate::scheduler::Scheduler;
use chrono::{DateTime, Utc};
use rc_adapters::{CheckinAdapter, CredentialSource};
use rc_core::gate::state_at;
use rc_core::{BotConfig, BotState, Clock, Credential, Event, EventBus, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Cycle forever, waiting one interval between cycles
    Continuous,
    /// Run a single cycle, then go idle
    Once,
}

/// Collaborators injected into the bot
pub struct BotDeps<A, S, C> {
    pub checkin: A,
    pub source: S,
    pub clock: C,
    pub bus: EventBus,
    pub config: BotConfig,
}

pub struct Bot;

impl Bot {
    /// Move the scheduler to `Initializing` and spawn the cycle loop.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<A, S, C>(deps: BotDeps<A, S, C>, mode: RunMode) -> Result<BotHandle<C>, EngineError>
    where
        A: CheckinAdapter,
        S: CredentialSource,
        C: Clock,
    {
        let BotDeps {
            checkin,
            source,
            clock,
            bus,
            config,
        } = deps;

        let mut scheduler = Scheduler::new(clock.clone(), bus.clone(), config.cycle_interval);
        scheduler.start()?;
        let scheduler = Arc::new(Mutex::new(scheduler));
        let cancel = CancellationToken::new();

        let driver = Driver {
            runner: CycleRunner::new(
                checkin,
                clock.clone(),
                bus.clone(),
                config.account_delay,
                config.attempt_timeout,
            ),
            source,
            clock,
            bus,
            scheduler: Arc::clone(&scheduler),
            cancel: cancel.clone(),
            mode,
        };

        let fault_scheduler = Arc::clone(&scheduler);
        let span = tracing::info_span!("bot", ?mode);
        let task = tokio::spawn(
            async move {
                let result = driver.run().await;
                if let Err(e) = &result {
                    lock(&fault_scheduler).fail(&e.to_string());
                }
                result
            }
            .instrument(span),
        );

        Ok(BotHandle {
            scheduler,
            cancel,
            task: Some(task),
        })
    }
}

/// Control handle for a running bot
pub struct BotHandle<C: Clock> {
    scheduler: Arc<Mutex<Scheduler<C>>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<Result<(), EngineError>>>,
}

impl<C: Clock> BotHandle<C> {
    /// Stop the bot. Safe to call repeatedly and from any state.
    ///
    /// Waits in progress observe the stop immediately. An attempt already
    /// sent completes, but its cycle never re-arms the timer.
    pub fn stop(&self) {
        self.cancel.cancel();
        lock(&self.scheduler).stop();
    }

    pub fn state(&self) -> BotState {
        lock(&self.scheduler).state()
    }

    pub fn next_cycle_at(&self) -> Option<DateTime<Utc>> {
        lock(&self.scheduler).next_cycle_at()
    }

    /// Wait for the cycle loop to exit.
    ///
    /// `Ok` after a stop or a completed single run, `Err` after a fault.
    pub async fn join(&mut self) -> Result<(), EngineError> {
        let Some(task) = self.task.as_mut() else {
            return Ok(());
        };
        // Cancel-safe: the handle stays in place until the task has exited
        let joined = task.await;
        self.task = None;
        match joined {
            Ok(result) => result,
            Err(e) => {
                let reason = if e.is_panic() {
                    "orchestration task panicked".to_string()
                } else {
                    e.to_string()
                };
                lock(&self.scheduler).fail(&reason);
                Err(EngineError::Task(reason))
            }
        }
    }
}

struct Driver<A, S, C: Clock> {
    runner: CycleRunner<A, C>,
    source: S,
    clock: C,
    bus: EventBus,
    scheduler: Arc<Mutex<Scheduler<C>>>,
    cancel: CancellationToken,
    mode: RunMode,
}

impl<A, S, C> Driver<A, S, C>
where
    A: CheckinAdapter,
    S: CredentialSource,
    C: Clock,
{
    async fn run(self) -> Result<(), EngineError> {
        let mut credentials = self.load_credentials();

        loop {
            {
                let mut scheduler = lock(&self.scheduler);
                if self.cancel.is_cancelled() || scheduler.state() == BotState::Idle {
                    return Ok(());
                }
                scheduler.begin_cycle()?;
            }

            self.runner.run_cycle(&credentials, &self.cancel).await;

            if self.mode == RunMode::Once {
                lock(&self.scheduler).stop();
                return Ok(());
            }

            let Some(timer) = lock(&self.scheduler).finish_cycle()? else {
                return Ok(());
            };
            self.announce_next_cycle(timer.duration);

            tokio::select! {
                _ = tokio::time::sleep(timer.duration) => {}
                _ = self.cancel.cancelled() => return Ok(()),
            }

            if credentials.is_empty() {
                credentials = self.load_credentials();
            }
        }
    }

    /// Load and announce credentials. A failed load yields an empty set.
    fn load_credentials(&self) -> Vec<Credential> {
        let raw = match self.source.load() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(source = %self.source.describe(), error = %e, "credential load failed");
                self.bus
                    .publish(Event::error(format!("could not load credentials: {}", e)));
                Vec::new()
            }
        };

        let credentials = Credential::from_raw(raw);
        let now = self.clock.utc_now();
        for credential in &credentials {
            self.bus.publish(Event::CredentialStatus {
                index: credential.index(),
                masked_identifier: credential.masked(),
                state: state_at(credential.expose(), now),
            });
        }
        lock(&self.scheduler).set_credential_count(credentials.len());
        credentials
    }

    fn announce_next_cycle(&self, wait: std::time::Duration) {
        let Some(at) = lock(&self.scheduler).next_cycle_at() else {
            return;
        };
        self.bus.publish(Event::log(
            LogLevel::Wait,
            format!(
                "next check-in at {} (in {})",
                at.format("%Y-%m-%d %H:%M:%S UTC"),
                humantime::format_duration(wait)
            ),
        ));
    }
}

fn lock<C: Clock>(scheduler: &Mutex<Scheduler<C>>) -> MutexGuard<'_, Scheduler<C>> {
    scheduler.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
#[path = "bot_tests.rs"]
mod tests;
