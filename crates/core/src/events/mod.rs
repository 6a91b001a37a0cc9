// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events system decoupling orchestration from presentation
//!
//! This module provides:
//! - `EventBus` - Ordered, synchronous fan-out to matching subscribers
//! - `EventLog` - In-memory record of the current run, for replay
//! - `EventPattern` - Name patterns for subscriptions

mod bus;
mod log;
mod subscription;

pub use bus::{EventBus, EventReceiver, EventSender};
pub use log::{EventLog, EventRecord};
pub use subscription::{EventPattern, SubscriberId, Subscription};
