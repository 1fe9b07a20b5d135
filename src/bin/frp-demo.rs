// Copyright (c) 2025 - Cowboy AI, Inc.
//! FRP Demo
//!
//! Drives a small reactive graph from the tokio runtime:
//! - a scripted word behavior ("Foo", "Bar", "Hello") mapped to its length
//! - a scripted click series folded into a running total
//!
//! Run with: cargo run --bin frp-demo [config.json]
//!
//! Without a config file the ticker is configured from FRP_TICK_INTERVAL_MS
//! and FRP_MAX_TICKS.

use anyhow::{Context, Result};
use cim_frp::frp::{accum, Samplable, Signal};
use cim_frp::{BehaviorScript, SeriesScript, Step, Ticker, TickerConfig};
use std::sync::Arc;
use tracing::info;

fn load_config() -> Result<TickerConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {path}"))?;
            TickerConfig::from_json(&raw).with_context(|| format!("Invalid config file {path}"))
        }
        None => TickerConfig::from_env().context("Invalid ticker environment"),
    }
}

/// Steps every script on each tick, until all are exhausted
struct Scripts(Vec<Arc<dyn Step>>);

impl Step for Scripts {
    fn step(&self) -> bool {
        self.0.iter().fold(false, |any, script| script.step() || any)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config()?;
    info!(
        interval_ms = config.interval_ms,
        max_ticks = ?config.max_ticks,
        "configuration loaded"
    );

    let words = Arc::new(BehaviorScript::new(["Foo", "Bar", "Hello"])?);
    let lengths = words.behavior().map(|word| word.len());
    let lengths_watch = lengths.observe(|length| info!(length, "word length"));

    let clicks = Arc::new(SeriesScript::new([1u32, 1, 1, 1])?);
    let (total, fold) = accum(&clicks.series(), 0u32, |click, total| total + click);
    let total_watch = total.observe(|total| info!(total, "click total"));

    let scripts: Vec<Arc<dyn Step>> = vec![words.clone(), clicks.clone()];
    let ticker = Ticker::new(config)?;
    let ticks = ticker
        .run(Scripts(scripts))
        .await
        .context("Ticker failed")?;

    lengths_watch.cancel();
    total_watch.cancel();
    fold.cancel();

    info!(
        ticks,
        final_length = lengths.peek(),
        final_total = total.peek(),
        "demo finished"
    );
    Ok(())
}
