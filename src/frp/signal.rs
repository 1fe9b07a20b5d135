// Copyright (c) 2025 - Cowboy AI, Inc.
//! Signal Traits - Shared Surface of Behaviors and Series
//!
//! # Type Hierarchy
//!
//! ```text
//! Signal<T>                 map, observe
//!   ├── Samplable<T>        peek            (Behavior<T>)
//!   └── Discrete<T>         once            (Series<T>)
//! ```
//!
//! # Functor Laws
//!
//! Both implementations satisfy the Functor laws observationally:
//!
//! 1. **Identity**: `signal.map(|x| x)` delivers what `signal` delivers
//! 2. **Composition**: `signal.map(f).map(g)` delivers what
//!    `signal.map(|x| g(f(x)))` delivers

use super::Subscription;

/// Base trait for time-varying values and event streams
pub trait Signal<T>: Clone + Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// The type of signal produced by map
    type Mapped<U: Clone + Send + Sync + 'static>: Signal<U>;

    /// Apply a function to every value the signal delivers
    fn map<U, F>(&self, f: F) -> Self::Mapped<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static;

    /// Continuously push the signal's values to `handler` until the returned
    /// subscription is cancelled
    fn observe<H>(&self, handler: H) -> Subscription
    where
        H: Fn(T) + Send + Sync + 'static;
}

/// Signals that always hold a current value
pub trait Samplable<T>: Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Read the current value without subscribing to its invalidation
    fn peek(&self) -> T;
}

/// Signals with discrete occurrences and no current value
pub trait Discrete<T>: Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Deliver only the next occurrence to `handler`
    fn once<H>(&self, handler: H) -> Subscription
    where
        H: Fn(T) + Send + Sync + 'static;
}
