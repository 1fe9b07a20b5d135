// Copyright (c) 2025 - Cowboy AI, Inc.
//! Push-Pull Functional Reactive Programming (FRP) Engine
//!
//! This module provides the two dual FRP abstractions and the combinators
//! that compose them. Evaluation is push-pull: values are pulled (and
//! memoized) on demand, while invalidations are pushed to whoever pulled them.
//!
//! # Core Concepts
//!
//! ## Behavior<T> (Time-Varying Value)
//!
//! A value that exists at all points in time. Pulling a behavior hands it an
//! invalidation callback and returns the current value; the callback fires
//! once, when that value goes stale.
//!
//! ```text
//! Behavior<T> ≅ Callback → T
//!
//! Time:  ────────────────────────────→
//! Value:  ≈≈≈≈≈≈≈≈│≈≈≈≈≈≈≈≈≈≈│≈≈≈≈≈≈≈
//!                 ↑ invalidation
//! ```
//!
//! ## Series<T> (Discrete Event Stream)
//!
//! A push-based stream with no current value. Subscribing hands it a handler
//! that is consumed by the next occurrence.
//!
//! ```text
//! Series<T> ≅ Handler<T> → ()
//!
//! Time:  ────────────────────────────→
//! Value:      ●       ●   ●       ●
//! ```
//!
//! ## Bridge
//!
//! [`diff`] turns the invalidation edges of a behavior into a series, and
//! [`accum`] folds a series back into a behavior.
//!
//! # Driving the Engine
//!
//! The engine never schedules anything on its own. External producers (see
//! [`Var`], [`Sink`] and the `driver` module) decide when invalidations
//! happen; the engine only keeps its bookkeeping consistent.
//!
//! # Example
//!
//! ```rust
//! use cim_frp::frp::*;
//!
//! let name = Var::new("Foo".to_string());
//! let length = name.behavior().map(|s| s.len());
//!
//! let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let subscription = length.observe(move |n| sink.lock().unwrap().push(n));
//!
//! name.set("Hello".to_string());
//! subscription.cancel();
//!
//! assert_eq!(*seen.lock().unwrap(), vec![3, 5]);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub mod behavior;
pub mod bridge;
pub mod combinators;
mod memo;
pub mod series;
pub mod signal;
pub mod source;
pub mod subscription;

pub use behavior::Behavior;
pub use bridge::{accum, diff};
pub use combinators::*;
pub use series::{Series, SeriesStream};
pub use signal::{Discrete, Samplable, Signal};
pub use source::{Sink, Var};
pub use subscription::Subscription;

/// Invalidation callback handed to a behavior when it is pulled
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Consumer of a single stream occurrence
pub type Handler<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Lock a mutex, recovering the guard if a user function panicked while it
/// was held.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
