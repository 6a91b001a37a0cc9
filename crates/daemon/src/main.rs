// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rollcall (rollcall)
//!
//! Runs the daily check-in bot in the foreground with a line dashboard.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod dashboard;
mod lifecycle;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rc_core::{EventBus, EventLog, SubscriberId, Subscription};
use rc_engine::{Bot, StatusProjection};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::dashboard::{Dashboard, DASHBOARD_ID};
use crate::lifecycle::{Config, LifecycleError};

#[derive(Parser, Debug)]
#[command(
    name = "rollcall",
    version,
    about = "Rollcall - daily check-in bot for a list of accounts"
)]
pub struct Cli {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Token file (JSON array or one token per line)
    #[arg(long)]
    tokens: Option<PathBuf>,

    /// Check-in endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Time between cycles, e.g. "24h"
    #[arg(long, value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// Pause between accounts within a cycle, e.g. "3s"
    #[arg(long, value_parser = humantime::parse_duration)]
    account_delay: Option<Duration>,

    /// Upper bound on one check-in request, e.g. "15s"
    #[arg(long, value_parser = humantime::parse_duration)]
    attempt_timeout: Option<Duration>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Print events as JSON lines instead of the dashboard
    #[arg(long)]
    json: bool,

    /// How often the dashboard prints the status snapshot
    #[arg(long, value_parser = humantime::parse_duration, default_value = "60s")]
    tick: Duration,

    /// Log file (defaults to rollcall.log in the state directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("rollcall: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, LifecycleError> {
    let config = Config::resolve(&cli)?;

    // Set up logging
    let _log_guard = lifecycle::setup_logging(&config.log_path)?;
    info!(
        endpoint = %config.endpoint,
        tokens = %config.bot.tokens_path.display(),
        mode = ?config.mode,
        "starting rollcall"
    );

    let bus = EventBus::new();
    let log = EventLog::attach(&bus);
    lifecycle::mirror_logs(&bus);
    let (projection, _) = StatusProjection::attach(&bus, "status");
    let events = bus.subscribe_channel(Subscription::all(DASHBOARD_ID, "line dashboard"));
    let dashboard = tokio::spawn(
        Dashboard::new(projection.clone(), config.json, config.tick).run(events),
    );
    info!(
        count = bus.subscriber_count(),
        subscribers = ?bus.list_subscriptions(),
        "event bus wired"
    );

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let mut bot = Bot::start(config.deps(bus.clone()), config.mode)?;

    let stopped = tokio::select! {
        result = bot.join() => Some(result),
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down...");
            None
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down...");
            None
        }
    };
    let result = match stopped {
        Some(result) => result,
        None => {
            bot.stop();
            bot.join().await
        }
    };

    // Closing the channel lets the dashboard drain and print its final frame
    bus.unsubscribe(&SubscriberId(DASHBOARD_ID.to_string()));
    if let Err(e) = dashboard.await {
        error!("dashboard task failed: {}", e);
    }
    lifecycle::check_replay(&log, &projection.snapshot());

    match result {
        Ok(()) => {
            info!("rollcall stopped");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("bot faulted: {}", e);
            eprintln!("rollcall: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
