// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process lifecycle: configuration, logging, and collaborator wiring.

use std::path::PathBuf;
use std::time::Duration;

use rc_adapters::{
    FileCredentialSource, HttpCheckinAdapter, TracedCheckinAdapter, TracedCredentialSource,
};
use rc_core::{
    BotConfig, ConfigError, Event, EventBus, EventLog, EventPattern, LogLevel, StatusSnapshot,
    Subscription, SystemClock,
};
use rc_engine::{BotDeps, EngineError, RunMode};
use thiserror::Error;

use crate::Cli;

/// Bot dependencies with concrete adapter types (wrapped with tracing)
pub type LiveDeps = BotDeps<
    TracedCheckinAdapter<HttpCheckinAdapter>,
    TracedCredentialSource<FileCredentialSource>,
    SystemClock,
>;

/// Fully resolved process configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bot: BotConfig,
    /// Check-in endpoint, required
    pub endpoint: String,
    /// Path to the process log file
    pub log_path: PathBuf,
    pub mode: RunMode,
    /// Print events as JSON lines instead of the line dashboard
    pub json: bool,
    /// How often the dashboard renders the snapshot
    pub tick: Duration,
}

impl Config {
    /// Defaults, then the config file, then command-line overrides
    pub fn resolve(cli: &Cli) -> Result<Self, LifecycleError> {
        let mut bot = match &cli.config {
            Some(path) => BotConfig::load(path)?,
            None => BotConfig::default(),
        };

        if let Some(tokens) = &cli.tokens {
            bot.tokens_path = tokens.clone();
        }
        if let Some(endpoint) = &cli.endpoint {
            bot.endpoint = Some(endpoint.clone());
        }
        if let Some(interval) = cli.interval {
            bot.cycle_interval = interval;
        }
        if let Some(delay) = cli.account_delay {
            bot.account_delay = delay;
        }
        if let Some(timeout) = cli.attempt_timeout {
            bot.attempt_timeout = timeout;
        }
        bot.validate()?;
        if cli.tick.is_zero() {
            return Err(ConfigError::Invalid("tick must be positive".into()).into());
        }

        let endpoint = bot.endpoint.clone().ok_or(LifecycleError::MissingEndpoint)?;
        let log_path = match &cli.log_file {
            Some(path) => path.clone(),
            None => state_dir()?.join("rollcall.log"),
        };

        Ok(Self {
            bot,
            endpoint,
            log_path,
            mode: if cli.once {
                RunMode::Once
            } else {
                RunMode::Continuous
            },
            json: cli.json,
            tick: cli.tick,
        })
    }

    /// Build the live collaborators for this configuration
    pub fn deps(&self, bus: EventBus) -> LiveDeps {
        BotDeps {
            checkin: TracedCheckinAdapter::new(HttpCheckinAdapter::new(
                self.endpoint.clone(),
                self.bot.attempt_timeout,
            )),
            source: TracedCredentialSource::new(FileCredentialSource::new(
                self.bot.tokens_path.clone(),
            )),
            clock: SystemClock,
            bus,
            config: self.bot.clone(),
        }
    }
}

/// Errors that stop the process before or outside the bot itself
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("no check-in endpoint configured (set `endpoint` in the config file or pass --endpoint)")]
    MissingEndpoint,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Engine(#[from] EngineError),
}

fn state_dir() -> Result<PathBuf, LifecycleError> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("rollcall"))
        .ok_or(LifecycleError::NoStateDir)
}

pub fn setup_logging(
    log_path: &std::path::Path,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Create log directory if needed
    let dir = log_path.parent().unwrap_or_else(|| std::path::Path::new(""));
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(
        dir,
        log_path.file_name().ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

/// Copy bus `log` events into the process log
pub fn mirror_logs(bus: &EventBus) {
    bus.subscribe(
        Subscription::new(
            "tracing-mirror",
            vec![EventPattern::new("log:*")],
            "mirror bot log events into tracing",
        ),
        |event| {
            if let Event::Log { level, message } = event {
                match level {
                    LogLevel::Error => tracing::error!(target: "rollcall::bot", "{}", message),
                    LogLevel::Warn => tracing::warn!(target: "rollcall::bot", "{}", message),
                    LogLevel::Info | LogLevel::Success | LogLevel::Wait => {
                        tracing::info!(target: "rollcall::bot", level = ?level, "{}", message)
                    }
                }
            }
        },
    );
}

/// Rebuild the snapshot from the run's event log and compare it with the
/// live projection. Returns whether they agree.
pub fn check_replay(log: &EventLog, live: &StatusSnapshot) -> bool {
    let events = log.events();
    let replayed = StatusSnapshot::replay(&events);
    if replayed == *live {
        tracing::debug!(events = events.len(), "replayed status matches live projection");
        true
    } else {
        tracing::warn!(
            events = events.len(),
            live = ?live,
            replayed = ?replayed,
            "replayed status diverges from live projection"
        );
        false
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
