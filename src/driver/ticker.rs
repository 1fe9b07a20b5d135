// Copyright (c) 2025 - Cowboy AI, Inc.
//! Interval driver on the tokio runtime

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::Step;
use crate::config::TickerConfig;
use crate::errors::FrpResult;

/// Steps a driver on a fixed interval
///
/// The first step happens one interval after the ticker starts. The ticker
/// stops when the driver reports it has nothing left to do or when
/// `max_ticks` steps have run.
#[derive(Debug, Clone)]
pub struct Ticker {
    config: TickerConfig,
}

impl Ticker {
    /// Create a ticker; the configuration is validated here
    pub fn new(config: TickerConfig) -> FrpResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    /// Spawn the ticker on the current runtime
    ///
    /// The task resolves to the number of steps that ran.
    pub fn spawn<S>(&self, driver: S) -> JoinHandle<u64>
    where
        S: Step + 'static,
    {
        tokio::spawn(drive(self.config.clone(), driver))
    }

    /// Run the ticker to completion
    pub async fn run<S>(&self, driver: S) -> FrpResult<u64>
    where
        S: Step + 'static,
    {
        Ok(self.spawn(driver).await?)
    }
}

async fn drive<S: Step>(config: TickerConfig, driver: S) -> u64 {
    let period = config.interval();
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        interval_ms = config.interval_ms,
        max_ticks = ?config.max_ticks,
        "ticker started"
    );

    let mut ticks = 0u64;
    loop {
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            debug!(ticks, "tick limit reached");
            break;
        }

        interval.tick().await;
        if !driver.step() {
            debug!(ticks, "driver exhausted");
            break;
        }
        ticks += 1;
    }

    info!(ticks, "ticker finished");
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{step_fn, BehaviorScript};
    use crate::frp::Samplable;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_new_validates() {
        assert!(Ticker::new(TickerConfig::new(Duration::ZERO)).is_err());
        assert!(Ticker::new(TickerConfig::default()).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_stops_when_driver_is_exhausted() {
        let script = Arc::new(BehaviorScript::new([1, 2, 3]).unwrap());
        let ticker = Ticker::new(TickerConfig::new(Duration::from_millis(10))).unwrap();

        let ticks = ticker.run(script.clone()).await.unwrap();
        assert_eq!(ticks, 2);
        assert_eq!(script.behavior().peek(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_honours_max_ticks() {
        let config = TickerConfig::new(Duration::from_millis(10)).with_max_ticks(3);
        let ticks = Ticker::new(config)
            .unwrap()
            .run(step_fn(|| true))
            .await
            .unwrap();
        assert_eq!(ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_step_waits_one_interval() {
        let script = Arc::new(BehaviorScript::new(["a", "b"]).unwrap());
        let ticker = Ticker::new(TickerConfig::new(Duration::from_millis(100))).unwrap();
        let handle = ticker.spawn(script.clone());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(script.current(), "a");

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(script.current(), "b");

        assert_eq!(handle.await.unwrap(), 1);
    }
}
