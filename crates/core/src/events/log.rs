// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory event log for the current process run
//!
//! History is not persisted across restarts; the log only lives as long as
//! the process. It backs replay (rebuilding a snapshot from scratch) and
//! gives tests an ordered view of everything the engine published.

use super::bus::EventBus;
use super::subscription::{EventPattern, Subscription};
use crate::event::Event;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// A logged event with its position in the stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    /// Monotonic sequence number, starting at 1
    pub sequence: u64,
    pub name: String,
    pub event: Event,
}

#[derive(Default)]
struct Inner {
    sequence: u64,
    records: Vec<EventRecord>,
}

/// Ordered, append-only record of published events
#[derive(Clone, Default)]
pub struct EventLog {
    inner: Arc<Mutex<Inner>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that records every event published on `bus`
    pub fn attach(bus: &EventBus) -> Self {
        let log = Self::new();
        let sink = log.clone();
        bus.subscribe(Subscription::all("event-log", "Event log"), move |event| {
            sink.append(event.clone());
        });
        log
    }

    pub fn append(&self, event: Event) -> EventRecord {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.sequence += 1;
        let record = EventRecord {
            sequence: inner.sequence,
            name: event.name(),
            event,
        };
        inner.records.push(record.clone());
        record
    }

    pub fn records(&self) -> Vec<EventRecord> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .records
            .clone()
    }

    /// All events in publication order
    pub fn events(&self) -> Vec<Event> {
        self.records().into_iter().map(|r| r.event).collect()
    }

    pub fn query(&self, pattern: &EventPattern) -> Vec<EventRecord> {
        self.records()
            .into_iter()
            .filter(|r| pattern.matches(&r.name))
            .collect()
    }

    pub fn after(&self, sequence: u64) -> Vec<EventRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.sequence > sequence)
            .collect()
    }

    pub fn current_sequence(&self) -> u64 {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).sequence
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
