// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Behaviors
//!
//! Functor and applicative laws, memoization and change suppression,
//! checked over arbitrary values and arbitrary update sequences.

use cim_frp::frp::{apply2, pure, Behavior, Callback, Samplable, Signal, Var};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Helpers
// ============================================================================

/// Observe `behavior`, apply `updates` to `var`, return what was delivered
fn observed<T, U>(var: &Var<T>, behavior: &Behavior<U>, updates: &[T]) -> Vec<U>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
{
    let log = Arc::new(Mutex::new(Vec::new()));
    let record = log.clone();
    let subscription = behavior.observe(move |value| record.lock().unwrap().push(value));
    for update in updates {
        var.set(update.clone());
    }
    subscription.cancel();
    let delivered = log.lock().unwrap().clone();
    delivered
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: A pure behavior reads back its value
    #[test]
    fn prop_peek_pure(value in any::<i64>()) {
        prop_assert_eq!(pure(value).peek(), value);
    }

    /// Property: Mapping commutes with reading
    #[test]
    fn prop_peek_map(value in any::<i32>(), offset in any::<i32>()) {
        let var = Var::new(value);
        let mapped = var.behavior().map(move |x| x.wrapping_add(offset));
        prop_assert_eq!(mapped.peek(), value.wrapping_add(offset));
    }

    /// Property: Mapping the identity changes nothing an observer can see
    #[test]
    fn prop_map_identity(initial in any::<i32>(), updates in prop::collection::vec(any::<i32>(), 0..20)) {
        let var = Var::new(initial);
        let plain = observed(&var, &var.behavior(), &updates);
        let var = Var::new(initial);
        let mapped = observed(&var, &var.behavior().map(|x| x), &updates);
        prop_assert_eq!(plain, mapped);
    }

    /// Property: Mapping twice equals mapping the composition
    #[test]
    fn prop_map_composition(initial in -1000i32..1000, updates in prop::collection::vec(-1000i32..1000, 0..20)) {
        let f = |x: i32| x * 3;
        let g = |x: i32| x - 7;

        let var = Var::new(initial);
        let chained = observed(&var, &var.behavior().map(f).map(g), &updates);
        let var = Var::new(initial);
        let composed = observed(&var, &var.behavior().map(move |x| g(f(x))), &updates);
        prop_assert_eq!(chained, composed);
    }

    /// Property: Lifting over a pure operand is mapping
    #[test]
    fn prop_apply2_pure_is_map(initial in any::<i16>(), other in any::<i16>(), updates in prop::collection::vec(any::<i16>(), 0..20)) {
        let var = Var::new(initial);
        let lifted = observed(
            &var,
            &apply2(&var.behavior(), &pure(other), |a: i16, b: i16| i32::from(a) + i32::from(b)),
            &updates,
        );
        let var = Var::new(initial);
        let mapped = observed(
            &var,
            &var.behavior().map(move |a| i32::from(a) + i32::from(other)),
            &updates,
        );
        prop_assert_eq!(lifted, mapped);
    }

    /// Property: The producer runs once per generation, however often it is read
    #[test]
    fn prop_memoized_reads(reads in 1usize..20, generations in 1usize..10) {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let pending: Arc<Mutex<Option<Callback>>> = Arc::new(Mutex::new(None));
        let slot = pending.clone();
        let behavior = Behavior::new(move |invalidate: Callback| {
            *slot.lock().unwrap() = Some(invalidate);
            counter.fetch_add(1, Ordering::SeqCst)
        });

        for generation in 0..generations {
            for _ in 0..reads {
                prop_assert_eq!(behavior.peek(), generation);
            }
            let invalidate = pending.lock().unwrap().take().unwrap();
            invalidate();
        }
        prop_assert_eq!(runs.load(Ordering::SeqCst), generations);
    }

    /// Property: Dedup delivers exactly the run boundaries of the updates
    #[test]
    fn prop_dedup_delivers_runs(initial in 0u8..4, updates in prop::collection::vec(0u8..4, 0..30)) {
        let var = Var::new(initial);
        let delivered = observed(&var, &var.behavior().dedup(), &updates);

        let mut expected = vec![initial];
        for update in &updates {
            if expected.last() != Some(update) {
                expected.push(*update);
            }
        }
        prop_assert_eq!(delivered, expected);
    }

    /// Property: An undeduplicated observer sees every write
    #[test]
    fn prop_observe_sees_every_write(initial in any::<u8>(), updates in prop::collection::vec(any::<u8>(), 0..30)) {
        let var = Var::new(initial);
        let delivered = observed(&var, &var.behavior(), &updates);

        let mut expected = vec![initial];
        expected.extend(updates.iter().copied());
        prop_assert_eq!(delivered, expected);
    }
}
