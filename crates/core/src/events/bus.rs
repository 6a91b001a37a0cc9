// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus: synchronous, ordered fan-out to subscribers

use super::subscription::{SubscriberId, Subscription};
use crate::event::Event;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::mpsc;

/// Sender for channel-backed subscribers
pub type EventSender = mpsc::UnboundedSender<Event>;
/// Receiver for channel-backed subscribers
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

struct Subscriber {
    subscription: Subscription,
    handler: Handler,
}

/// Routes published events to matching subscribers.
///
/// `publish` delivers to every matching subscriber, in registration order,
/// before it returns. Publishes from different callers are serialized, so a
/// handler must never publish itself. Handlers must be quick; anything slow
/// belongs behind [`EventBus::subscribe_channel`].
///
/// Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    delivery: Arc<Mutex<()>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Re-using an id replaces the earlier subscriber.
    pub fn subscribe<F>(&self, subscription: Subscription, handler: F) -> SubscriberId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = subscription.id.clone();
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.retain(|s| s.subscription.id != id);
        subs.push(Subscriber {
            subscription,
            handler: Arc::new(handler),
        });
        id
    }

    /// Subscribe through an unbounded channel, for consumers that do slow work
    pub fn subscribe_channel(&self, subscription: Subscription) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribe(subscription, move |event| {
            // Receiver gone means the consumer shut down
            let _ = tx.send(event.clone());
        });
        rx
    }

    pub fn unsubscribe(&self, id: &SubscriberId) {
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.retain(|s| &s.subscription.id != id);
    }

    /// Deliver an event to all matching subscribers
    pub fn publish(&self, event: Event) {
        let _delivering = self.delivery.lock().unwrap_or_else(|e| e.into_inner());
        let name = event.name();

        let targets: Vec<(SubscriberId, Handler)> = self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|s| s.subscription.matches(&name))
            .map(|s| (s.subscription.id.clone(), Arc::clone(&s.handler)))
            .collect();

        for (id, handler) in targets {
            if catch_unwind(AssertUnwindSafe(|| handler(&event))).is_err() {
                tracing::error!(subscriber = %id, event = %name, "event subscriber panicked");
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Subscriber ids in registration order
    pub fn list_subscriptions(&self) -> Vec<SubscriberId> {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|s| s.subscription.id.clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
