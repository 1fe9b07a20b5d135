// Copyright (c) 2025 - Cowboy AI, Inc.
//! Behavior - Memoized Time-Varying Values
//!
//! A `Behavior<T>` represents a value that exists at all points in time.
//! Pulling it with an invalidation callback returns the current value; the
//! callback fires once, when that value goes stale.
//!
//! # Characteristics
//!
//! - **Always has a value**: can be sampled at any moment
//! - **Lazy**: nothing is computed until somebody pulls
//! - **Memoized**: one evaluation per generation, however many consumers pull
//! - **Deduplicated**: one notification per generation, however many times
//!   the source signals
//!
//! # Mathematical Model
//!
//! ```text
//! Behavior<T> ≅ Callback → T
//! ```
//!
//! # Examples
//!
//! ## Constant Behavior
//!
//! ```rust
//! use cim_frp::frp::{Behavior, Samplable};
//!
//! let constant = Behavior::pure(42);
//! assert_eq!(constant.peek(), 42);
//! ```
//!
//! ## Derived Behavior
//!
//! ```rust
//! use cim_frp::frp::{Samplable, Signal, Var};
//!
//! let numbers = Var::new(5);
//! let doubled = numbers.behavior().map(|x| x * 2);
//! assert_eq!(doubled.peek(), 10);
//!
//! numbers.set(21);
//! assert_eq!(doubled.peek(), 42);
//! ```

use std::fmt::{self, Debug};
use std::sync::{Arc, Mutex};
use tracing::trace;

use super::memo::{Constant, Memo, Pull};
use super::signal::{Samplable, Signal};
use super::{bridge, lock, Callback, Handler, Series, Subscription};

/// Memoized, pull-based time-varying value
///
/// Cloning a `Behavior` creates a new handle to the **same** memoized state.
pub struct Behavior<T> {
    inner: Arc<dyn Pull<T>>,
}

impl<T> Clone for Behavior<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Debug for Behavior<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Behavior<{}>", std::any::type_name::<T>())
    }
}

impl<T: Clone + Send + Sync + 'static> Behavior<T> {
    /// Wrap a raw producer into a memoized behavior
    ///
    /// The producer receives the invalidation closure of the generation it is
    /// evaluating and returns that generation's value. It runs lazily, on the
    /// first pull after construction or after an invalidation. Calling the
    /// closure more than once is harmless.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cim_frp::frp::{Behavior, Samplable};
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let runs = Arc::new(AtomicUsize::new(0));
    /// let counter = runs.clone();
    /// let behavior = Behavior::new(move |_invalidate| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    ///     "Foo"
    /// });
    ///
    /// assert_eq!(behavior.peek(), "Foo");
    /// assert_eq!(behavior.peek(), "Foo");
    /// assert_eq!(runs.load(Ordering::SeqCst), 1);
    /// ```
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn(Callback) -> T + Send + Sync + 'static,
    {
        Self {
            inner: Memo::new(producer),
        }
    }

    /// A behavior that never changes
    pub fn pure(value: T) -> Self {
        Self {
            inner: Arc::new(Constant(value)),
        }
    }

    /// Pull the current value, registering `callback` to fire once when it
    /// goes stale
    pub fn sample(&self, callback: Callback) -> T {
        self.inner.pull(Some(callback))
    }

    /// Apply a changing function to a changing argument
    ///
    /// Both operands are pulled with the same invalidation callback, so a
    /// change in either invalidates the result.
    pub fn apply<A, B>(&self, argument: &Behavior<A>) -> Behavior<B>
    where
        T: Fn(A) -> B,
        A: Clone + Send + Sync + 'static,
        B: Clone + Send + Sync + 'static,
    {
        let functions = self.clone();
        let argument = argument.clone();
        Behavior::new(move |invalidate: Callback| {
            let function = functions.sample(invalidate.clone());
            function(argument.sample(invalidate))
        })
    }

    /// Monadic bind with dynamic switching
    ///
    /// Each evaluation pulls `self`, selects an inner behavior with `f` and
    /// pulls it with the same callback. When either invalidates, the whole
    /// chain is re-evaluated under a new generation; the previously selected
    /// inner behavior still holds the old generation's callback, which is a
    /// no-op when it arrives.
    ///
    /// The selected inner behavior is retained until the next selection, so
    /// `f` may build it on the spot.
    pub fn bind<U, F>(&self, f: F) -> Behavior<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> Behavior<U> + Send + Sync + 'static,
    {
        let outer = self.clone();
        let current: Mutex<Option<Behavior<U>>> = Mutex::new(None);
        Behavior::new(move |invalidate: Callback| {
            let selected = f(outer.sample(invalidate.clone()));
            let value = selected.sample(invalidate);
            let _previous = lock(&current).replace(selected);
            value
        })
    }

    /// Suppress invalidations that do not change the value under `eq`
    ///
    /// On each invalidation of `self` the new value is compared with the
    /// value the returned behavior last published. Equal values re-arm the
    /// watch on `self` silently, keeping that published value as the
    /// baseline; only an unequal value invalidates the returned behavior.
    pub fn deflicker<E>(&self, eq: E) -> Behavior<T>
    where
        E: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let eq = Arc::new(eq);
        Behavior::new(move |invalidate: Callback| {
            let value = source.peek();
            source.sample(watch(source.clone(), eq.clone(), invalidate, value.clone()));
            value
        })
    }

    /// [`deflicker`](Self::deflicker) by `PartialEq`
    pub fn dedup(&self) -> Behavior<T>
    where
        T: PartialEq,
    {
        self.deflicker(|old: &T, new: &T| old == new)
    }

    /// Stream of `f(old, new)`, one occurrence per invalidation
    ///
    /// See [`bridge::diff`].
    pub fn diff<B, F>(&self, f: F) -> Series<B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(T, T) -> B + Send + Sync + 'static,
    {
        bridge::diff(self, f)
    }

    /// Stream of the values this behavior changes to
    pub fn changes(&self) -> Series<T> {
        self.diff(|_old, new| new)
    }
}

/// Callback re-reading `source` and forwarding only real changes
fn watch<T, E>(source: Behavior<T>, eq: Arc<E>, invalidate: Callback, old: T) -> Callback
where
    T: Clone + Send + Sync + 'static,
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    Arc::new(move || {
        let current = source.peek();
        if eq(&old, &current) {
            trace!("deflicker suppressed an invalidation");
            source.sample(watch(
                source.clone(),
                eq.clone(),
                invalidate.clone(),
                old.clone(),
            ));
        } else {
            invalidate();
        }
    })
}

/// Self-renewing observer callback
///
/// Each firing checks liveness first, then mints its successor and
/// redelivers.
fn renew<T>(behavior: Behavior<T>, handler: Handler<T>, subscription: Subscription) -> Callback
where
    T: Clone + Send + Sync + 'static,
{
    Arc::new(move || {
        if !subscription.is_active() {
            trace!(subscription = subscription.id(), "dropping invalidation for cancelled observer");
            return;
        }
        let next = renew(behavior.clone(), handler.clone(), subscription.clone());
        handler(behavior.sample(next));
    })
}

impl<T: Clone + Send + Sync + 'static> Signal<T> for Behavior<T> {
    type Mapped<U: Clone + Send + Sync + 'static> = Behavior<U>;

    fn map<U, F>(&self, f: F) -> Behavior<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        Behavior::new(move |invalidate: Callback| f(source.sample(invalidate)))
    }

    /// Deliver the current value now and again after every invalidation
    fn observe<H>(&self, handler: H) -> Subscription
    where
        H: Fn(T) + Send + Sync + 'static,
    {
        let subscription = Subscription::new();
        let handler: Handler<T> = Arc::new(handler);
        let current = self.sample(renew(self.clone(), handler.clone(), subscription.clone()));
        handler(current);
        subscription
    }
}

impl<T: Clone + Send + Sync + 'static> Samplable<T> for Behavior<T> {
    fn peek(&self) -> T {
        self.inner.pull(None)
    }
}
