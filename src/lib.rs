// Copyright (c) 2025 - Cowboy AI, Inc.
//! Push-pull functional reactive programming for the Composable Information Machine
//!
//! This crate provides memoized, lazily invalidated behaviors, one-shot event
//! series, the bridges between them, and drivers that feed a reactive graph
//! from the tokio runtime.

pub mod config;
pub mod driver;
pub mod errors;
pub mod frp;

// Re-export commonly used types
pub use config::TickerConfig;
pub use driver::{BehaviorScript, SeriesScript, Step, Ticker};
pub use errors::{FrpError, FrpResult};
pub use frp::{Behavior, Series, Subscription};
