// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cycle runner: one serial pass over every credential
//!
//! Credentials are processed strictly in load order with a pause between
//! accounts. Failures for one credential are reported and the cycle moves on.

use rc_adapters::CheckinAdapter;
use rc_core::outcome::{classify, RawReply};
use rc_core::{Clock, Credential, CredentialGate, CycleSummary, Event, EventBus, LogLevel};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct CycleRunner<A, C: Clock> {
    adapter: A,
    gate: CredentialGate<C>,
    bus: EventBus,
    account_delay: Duration,
    attempt_timeout: Duration,
}

impl<A, C> CycleRunner<A, C>
where
    A: CheckinAdapter,
    C: Clock,
{
    pub fn new(
        adapter: A,
        clock: C,
        bus: EventBus,
        account_delay: Duration,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            adapter,
            gate: CredentialGate::new(clock, bus.clone()),
            bus,
            account_delay,
            attempt_timeout,
        }
    }

    /// Run one cycle over `credentials`.
    ///
    /// Publishes one `checkinResult` per processed credential and always ends
    /// with a single `cycleComplete`. Cancellation cuts the inter-account
    /// pause short; an attempt already sent is allowed to finish.
    pub async fn run_cycle(
        &self,
        credentials: &[Credential],
        cancel: &CancellationToken,
    ) -> CycleSummary {
        let mut summary = CycleSummary {
            total: credentials.len(),
            ..Default::default()
        };

        if credentials.is_empty() {
            self.bus
                .publish(Event::warn("no credentials loaded, nothing to check in"));
            self.bus.publish(Event::CycleComplete {
                summary: summary.clone(),
            });
            return summary;
        }

        self.bus.publish(Event::info(format!(
            "starting check-in for {} account(s)",
            credentials.len()
        )));

        let mut remaining = credentials.iter().peekable();
        while let Some(credential) = remaining.next() {
            self.step(credential, &mut summary).await;

            if remaining.peek().is_none() {
                break;
            }
            if !self.pause(cancel).await {
                summary.cancelled = true;
                break;
            }
        }

        self.bus.publish(Event::log(
            if summary.cancelled {
                LogLevel::Warn
            } else {
                LogLevel::Info
            },
            describe(&summary),
        ));
        self.bus.publish(Event::CycleComplete {
            summary: summary.clone(),
        });
        summary
    }

    async fn step(&self, credential: &Credential, summary: &mut CycleSummary) {
        let index = credential.index();
        let state = self.gate.evaluate(credential);
        self.bus.publish(Event::CredentialStatus {
            index,
            masked_identifier: credential.masked(),
            state,
        });

        if !state.is_usable() {
            summary.skipped += 1;
            self.bus.publish(Event::skipped(index, state));
            return;
        }

        let reply = match tokio::time::timeout(
            self.attempt_timeout,
            self.adapter.attempt(credential.expose()),
        )
        .await
        {
            Ok(Ok(value)) => RawReply::Reply(value),
            Ok(Err(e)) => RawReply::Transport(e.to_string()),
            Err(_) => RawReply::Transport(format!(
                "no reply within {}",
                humantime::format_duration(self.attempt_timeout)
            )),
        };

        let classified = classify(&reply);
        let outcome = &classified.outcome;
        if outcome.accepted() {
            summary.accepted += 1;
            summary.reward_total += outcome.reward_amount();
            if outcome.already_done() {
                summary.already_done += 1;
            }
        } else {
            summary.failed += 1;
        }

        self.bus.publish(Event::log(
            classified.level,
            format!("account #{}: {}", index + 1, classified.message),
        ));
        self.bus.publish(Event::attempted(index, outcome));
    }

    /// Wait between accounts. Returns false when cancelled.
    async fn pause(&self, cancel: &CancellationToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        if self.account_delay.is_zero() {
            return true;
        }
        self.bus.publish(Event::log(
            LogLevel::Wait,
            format!(
                "waiting {} before next account",
                humantime::format_duration(self.account_delay)
            ),
        ));
        tokio::select! {
            _ = tokio::time::sleep(self.account_delay) => true,
            _ = cancel.cancelled() => false,
        }
    }
}

fn describe(summary: &CycleSummary) -> String {
    let prefix = if summary.cancelled {
        "check-in cycle interrupted"
    } else {
        "check-in cycle finished"
    };
    format!(
        "{}: {} new, {} already done, {} failed, {} skipped, +{} points",
        prefix,
        summary.accepted - summary.already_done,
        summary.already_done,
        summary.failed,
        summary.skipped,
        summary.reward_total
    )
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
