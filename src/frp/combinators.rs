// Copyright (c) 2025 - Cowboy AI, Inc.
//! Signal Combinators
//!
//! Free-function forms of the combinators, for call sites that read better
//! in prefix style, plus the n-ary lifts.
//!
//! # Available Combinators
//!
//! ## For Behaviors
//! - `pure` - Create a behavior with a fixed value
//! - `apply` - Apply a changing function to a changing value
//! - `apply2` / `apply3` - Lift a binary / ternary function
//! - `bind` - Select a behavior from the current value (dynamic switching)
//! - `deflicker` - Suppress invalidations that do not change the value
//! - `peek` - Read without subscribing
//!
//! ## For Series
//! - `once` - Deliver the next occurrence only
//! - `merge` - Occurrences of either stream
//!
//! # Examples
//!
//! ```rust
//! use cim_frp::frp::combinators::*;
//! use cim_frp::frp::Var;
//!
//! let x = Var::new(3);
//! let y = pure(4);
//!
//! let sum = apply2(&x.behavior(), &y, |a, b| a + b);
//! assert_eq!(peek(&sum), 7);
//!
//! x.set(10);
//! assert_eq!(peek(&sum), 14);
//! ```

use super::signal::{Discrete, Samplable};
use super::{Behavior, Callback, Series, Subscription};

/// A behavior that never changes
pub fn pure<T>(value: T) -> Behavior<T>
where
    T: Clone + Send + Sync + 'static,
{
    Behavior::pure(value)
}

/// Read the current value of a behavior without subscribing
pub fn peek<T, S>(signal: &S) -> T
where
    T: Clone + Send + Sync + 'static,
    S: Samplable<T>,
{
    signal.peek()
}

/// Apply a changing function to a changing argument
pub fn apply<A, B, F>(functions: &Behavior<F>, argument: &Behavior<A>) -> Behavior<B>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
    F: Fn(A) -> B + Clone + Send + Sync + 'static,
{
    functions.apply(argument)
}

/// Combine two behaviors using a binary function
///
/// Both operands share the result's invalidation callback, as with
/// [`apply`].
pub fn apply2<T, U, V, F>(a: &Behavior<T>, b: &Behavior<U>, f: F) -> Behavior<V>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    F: Fn(T, U) -> V + Send + Sync + 'static,
{
    let (a, b) = (a.clone(), b.clone());
    Behavior::new(move |invalidate: Callback| {
        let x = a.sample(invalidate.clone());
        f(x, b.sample(invalidate))
    })
}

/// Combine three behaviors using a ternary function
pub fn apply3<T, U, V, W, F>(
    a: &Behavior<T>,
    b: &Behavior<U>,
    c: &Behavior<V>,
    f: F,
) -> Behavior<W>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    W: Clone + Send + Sync + 'static,
    F: Fn(T, U, V) -> W + Send + Sync + 'static,
{
    let combined_ab = apply2(a, b, |x, y| (x, y));
    apply2(&combined_ab, c, move |(x, y), z| f(x, y, z))
}

/// Monadic bind; see [`Behavior::bind`]
pub fn bind<T, U, F>(behavior: &Behavior<T>, f: F) -> Behavior<U>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    F: Fn(T) -> Behavior<U> + Send + Sync + 'static,
{
    behavior.bind(f)
}

/// Suppress no-op invalidations; see [`Behavior::deflicker`]
pub fn deflicker<T, E>(behavior: &Behavior<T>, eq: E) -> Behavior<T>
where
    T: Clone + Send + Sync + 'static,
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    behavior.deflicker(eq)
}

/// Deliver the next occurrence of `series` to `handler`
pub fn once<T, H>(series: &Series<T>, handler: H) -> Subscription
where
    T: Clone + Send + Sync + 'static,
    H: Fn(T) + Send + Sync + 'static,
{
    series.once(handler)
}

/// Occurrences of either stream; see [`Series::merge`]
pub fn merge<T>(a: &Series<T>, b: &Series<T>) -> Series<T>
where
    T: Clone + Send + Sync + 'static,
{
    a.merge(b)
}
