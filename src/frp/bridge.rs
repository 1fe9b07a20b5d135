// Copyright (c) 2025 - Cowboy AI, Inc.
//! Bridge - Converting Between Behaviors and Series
//!
//! ```text
//!            diff
//! Behavior ────────► Series      one occurrence per invalidation edge
//!          ◄────────             fold of all occurrences
//!            accum
//! ```

use std::sync::{Arc, Mutex};

use super::signal::{Samplable, Signal};
use super::{lock, Behavior, Callback, Handler, Series, Subscription, Var};

/// Stream of invalidation edges of `behavior`, carrying `f(old, new)`
///
/// Each registration pulls `behavior` once, remembering the value it saw.
/// When that generation is invalidated the new value is read (without
/// subscribing) and `f(old, new)` is delivered. Like every series
/// registration it fires once; observe the result to follow every edge.
///
/// # Examples
///
/// ```rust
/// use cim_frp::frp::{diff, Signal, Var};
/// use std::sync::{Arc, Mutex};
///
/// let var = Var::new(1);
/// let deltas = diff(&var.behavior(), |old: i32, new: i32| new - old);
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let record = seen.clone();
/// let subscription = deltas.observe(move |d| record.lock().unwrap().push(d));
///
/// var.set(4);
/// var.set(10);
/// subscription.cancel();
///
/// assert_eq!(*seen.lock().unwrap(), vec![3, 6]);
/// ```
pub fn diff<A, B, F>(behavior: &Behavior<A>, f: F) -> Series<B>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
    F: Fn(A, A) -> B + Send + Sync + 'static,
{
    let behavior = behavior.clone();
    let f = Arc::new(f);
    Series::new(move |handler: Handler<B>| {
        let slot = Arc::new(EdgeSlot::new());
        let edge: Callback = {
            let (behavior, f, handler, slot) =
                (behavior.clone(), f.clone(), handler.clone(), slot.clone());
            Arc::new(move || {
                if let Some(old) = slot.fire() {
                    handler(f(old, behavior.peek()));
                }
            })
        };
        let current = behavior.sample(edge);
        if let Some(old) = slot.settle(current) {
            handler(f(old, behavior.peek()));
        }
    })
}

/// Hand-off between a `diff` registration and its edge callback
///
/// The edge may fire on another thread before the registering pull has
/// returned the old value. Whichever side arrives second delivers.
struct EdgeSlot<A> {
    state: Mutex<Edge<A>>,
}

enum Edge<A> {
    /// Neither the old value nor the edge has arrived
    Waiting,
    /// Old value known, edge not fired yet
    Armed(A),
    /// Edge fired before the old value was known
    Fired,
    /// Delivered
    Spent,
}

impl<A> EdgeSlot<A> {
    fn new() -> Self {
        Self {
            state: Mutex::new(Edge::Waiting),
        }
    }

    /// The edge fired; returns the old value if it is ours to deliver
    fn fire(&self) -> Option<A> {
        let mut state = lock(&self.state);
        match std::mem::replace(&mut *state, Edge::Spent) {
            Edge::Armed(old) => Some(old),
            Edge::Waiting | Edge::Fired => {
                *state = Edge::Fired;
                None
            }
            Edge::Spent => None,
        }
    }

    /// The old value is known; returns it if the edge already fired
    fn settle(&self, old: A) -> Option<A> {
        let mut state = lock(&self.state);
        match std::mem::replace(&mut *state, Edge::Spent) {
            Edge::Waiting => {
                *state = Edge::Armed(old);
                None
            }
            Edge::Fired => Some(old),
            other => {
                *state = other;
                None
            }
        }
    }
}

/// Fold `series` into a behavior seeded with `seed`
///
/// The fold subscribes to `series` immediately. Each occurrence replaces the
/// state with `f(occurrence, state)` and invalidates readers of the returned
/// behavior, so the new state is visible to `peek` straight away.
///
/// The subscription stays live until the returned [`Subscription`] is
/// cancelled; dropping the handle leaves the fold running.
///
/// # Examples
///
/// ```rust
/// use cim_frp::frp::{accum, Samplable, Sink};
///
/// let clicks = Sink::new();
/// let (count, _fold) = accum(&clicks.series(), 0, |_: (), n: u32| n + 1);
///
/// clicks.send(());
/// clicks.send(());
/// assert_eq!(count.peek(), 2);
/// ```
pub fn accum<A, B, F>(series: &Series<A>, seed: B, f: F) -> (Behavior<B>, Subscription)
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
    F: Fn(A, B) -> B + Send + Sync + 'static,
{
    let state = Var::new(seed);
    let behavior = state.behavior();
    let subscription = series.observe(move |occurrence| {
        state.update(|current| f(occurrence, current));
    });
    (behavior, subscription)
}

#[cfg(test)]
mod tests {
    use super::super::Sink;
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_diff_single_registration_fires_once() {
        let var = Var::new("a");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = seen.clone();
        diff(&var.behavior(), |old, new| (old, new))
            .subscribe(move |edge| record.lock().unwrap().push(edge));

        var.set("b");
        var.set("c");
        assert_eq!(*seen.lock().unwrap(), vec![("a", "b")]);
    }

    #[test]
    fn test_edge_slot_edge_after_old_value() {
        let slot = EdgeSlot::new();
        assert_eq!(slot.settle(1), None);
        assert_eq!(slot.fire(), Some(1));
        assert_eq!(slot.fire(), None);
    }

    #[test]
    fn test_edge_slot_edge_before_old_value() {
        let slot = EdgeSlot::new();
        assert_eq!(slot.fire(), None);
        assert_eq!(slot.settle(1), Some(1));
        assert_eq!(slot.fire(), None);
    }

    #[test]
    fn test_changes_reports_new_values() {
        let var = Var::new(0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = seen.clone();
        let subscription = var
            .behavior()
            .changes()
            .observe(move |v| record.lock().unwrap().push(v));

        var.set(1);
        var.set(1);
        var.set(2);
        subscription.cancel();

        assert_eq!(*seen.lock().unwrap(), vec![1, 1, 2]);
    }

    #[test]
    fn test_accum_cancel_freezes_state() {
        let sink = Sink::new();
        let (total, fold) = accum(&sink.series(), 0, |x: i32, acc: i32| acc + x);

        sink.send(5);
        fold.cancel();
        sink.send(7);

        assert_eq!(total.peek(), 5);
    }

    #[test]
    fn test_accum_before_any_occurrence_is_seed() {
        let sink: Sink<i32> = Sink::new();
        let (state, _fold) = sink.series().accum(vec![0], |x, mut acc: Vec<i32>| {
            acc.push(x);
            acc
        });
        assert_eq!(state.peek(), vec![0]);

        sink.send(1);
        assert_eq!(state.peek(), vec![0, 1]);
    }
}
