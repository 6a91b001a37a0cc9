// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live status projection
//!
//! Folds bus events into a [`StatusSnapshot`]. Readers get immutable
//! snapshots; each fold publishes a fresh one through a watch channel.

use rc_core::{Event, EventBus, EventPattern, StatusSnapshot, SubscriberId, Subscription};
use std::sync::Arc;
use tokio::sync::watch;

const PROJECTION_PATTERNS: [&str; 4] = ["status:*", "credential:*", "checkin:*", "cycle:*"];

#[derive(Clone)]
pub struct StatusProjection {
    tx: Arc<watch::Sender<Arc<StatusSnapshot>>>,
}

impl Default for StatusProjection {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusProjection {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(StatusSnapshot::default()));
        Self { tx: Arc::new(tx) }
    }

    /// Create a projection fed by every state-bearing event on `bus`
    pub fn attach(bus: &EventBus, id: &str) -> (Self, SubscriberId) {
        let projection = Self::new();
        let patterns = PROJECTION_PATTERNS
            .iter()
            .map(|p| EventPattern::new(p))
            .collect();
        let feed = projection.clone();
        let sub_id = bus.subscribe(
            Subscription::new(id, patterns, "status projection"),
            move |event| feed.fold(event),
        );
        (projection, sub_id)
    }

    /// Apply one event and publish the resulting snapshot
    pub fn fold(&self, event: &Event) {
        self.tx.send_modify(|current| {
            let mut next = StatusSnapshot::clone(current);
            next.apply(event);
            *current = Arc::new(next);
        });
    }

    /// The latest snapshot. Later folds never mutate it.
    pub fn snapshot(&self) -> Arc<StatusSnapshot> {
        Arc::clone(&self.tx.borrow())
    }

    /// Receiver notified after every fold
    pub fn watch(&self) -> watch::Receiver<Arc<StatusSnapshot>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
