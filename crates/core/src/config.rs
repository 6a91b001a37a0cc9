// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bot configuration
//!
//! Loaded from an optional TOML file; every field has a default and can be
//! overridden at startup. Durations use humantime syntax (`24h`, `3s`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CYCLE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_ACCOUNT_DELAY: Duration = Duration::from_millis(3000);
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const DEFAULT_TOKENS_PATH: &str = "tokens.txt";
/// Upper bound on every configured duration
pub const MAX_DURATION: Duration = Duration::from_secs(366 * 24 * 60 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to parse config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    /// Time between the end of one cycle and the start of the next
    #[serde(with = "humantime_serde")]
    pub cycle_interval: Duration,
    /// Pause between two accounts within a cycle
    #[serde(with = "humantime_serde")]
    pub account_delay: Duration,
    /// Upper bound on a single remote attempt
    #[serde(with = "humantime_serde")]
    pub attempt_timeout: Duration,
    /// Check-in endpoint of the remote service
    pub endpoint: Option<String>,
    /// File holding one token per account
    pub tokens_path: PathBuf,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            cycle_interval: DEFAULT_CYCLE_INTERVAL,
            account_delay: DEFAULT_ACCOUNT_DELAY,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            endpoint: None,
            tokens_path: PathBuf::from(DEFAULT_TOKENS_PATH),
        }
    }
}

impl BotConfig {
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: BotConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(origin.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml(&content, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_interval.is_zero() {
            return Err(ConfigError::Invalid("cycle_interval must be positive".into()));
        }
        if self.attempt_timeout.is_zero() {
            return Err(ConfigError::Invalid("attempt_timeout must be positive".into()));
        }
        for (name, value) in [
            ("cycle_interval", self.cycle_interval),
            ("account_delay", self.account_delay),
            ("attempt_timeout", self.attempt_timeout),
        ] {
            if value > MAX_DURATION {
                return Err(ConfigError::Invalid(format!(
                    "{} must be at most {}",
                    name,
                    humantime::format_duration(MAX_DURATION)
                )));
            }
        }
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "endpoint must be an http(s) URL: {}",
                    endpoint
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
