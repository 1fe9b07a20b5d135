// Copyright (c) 2025 - Cowboy AI, Inc.
//! Ticker configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{FrpError, FrpResult};

/// Environment variable holding the tick interval in milliseconds
pub const ENV_TICK_INTERVAL_MS: &str = "FRP_TICK_INTERVAL_MS";

/// Environment variable holding the maximum number of ticks
pub const ENV_MAX_TICKS: &str = "FRP_MAX_TICKS";

/// Configuration for a [`Ticker`](crate::driver::Ticker)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Time between ticks, in milliseconds
    pub interval_ms: u64,

    /// Stop after this many ticks (unbounded if not set)
    pub max_ticks: Option<u64>,
}

impl TickerConfig {
    /// Create a configuration ticking every `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: interval.as_millis().min(u64::MAX as u128) as u64,
            max_ticks: None,
        }
    }

    /// Set the maximum number of ticks
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Time between ticks
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Reject configurations a ticker cannot run with
    pub fn validate(&self) -> FrpResult<()> {
        if self.interval_ms == 0 {
            return Err(FrpError::Configuration(
                "interval_ms must be positive".to_string(),
            ));
        }
        if self.max_ticks == Some(0) {
            return Err(FrpError::Configuration(
                "max_ticks must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> FrpResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> FrpResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> FrpResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TICK_INTERVAL_MS) {
            config.interval_ms = parse_u64(ENV_TICK_INTERVAL_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_TICKS) {
            config.max_ticks = Some(parse_u64(ENV_MAX_TICKS, &raw)?);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_u64(key: &str, raw: &str) -> FrpResult<u64> {
    raw.trim()
        .parse()
        .map_err(|e| FrpError::Configuration(format!("{key}={raw:?}: {e}")))
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            max_ticks: None,
        }
    }
}
