// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Bridge
//!
//! `accum` must agree with a plain left fold, and `diff` must see every
//! edge exactly once.

use cim_frp::frp::{accum, diff, Samplable, Signal, Sink, Var};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

/// Fold step that is sensitive to order
fn step(occurrence: i32, state: i64) -> i64 {
    state.wrapping_mul(31).wrapping_add(i64::from(occurrence))
}

proptest! {
    /// Property: accum agrees with a fold after every prefix
    #[test]
    fn prop_accum_matches_fold(seed in any::<i64>(), occurrences in prop::collection::vec(any::<i32>(), 0..40)) {
        let sink = Sink::new();
        let (state, fold) = accum(&sink.series(), seed, step);

        let mut expected = seed;
        for occurrence in &occurrences {
            sink.send(*occurrence);
            expected = step(*occurrence, expected);
            prop_assert_eq!(state.peek(), expected);
        }
        fold.cancel();
    }

    /// Property: accum notifies its observer once per occurrence
    #[test]
    fn prop_accum_notifies_once_per_occurrence(occurrences in prop::collection::vec(any::<i32>(), 0..40)) {
        let sink = Sink::new();
        let (state, fold) = accum(&sink.series(), 0i64, step);
        let notified = Arc::new(Mutex::new(0usize));
        let counter = notified.clone();
        let watch = state.observe(move |_| *counter.lock().unwrap() += 1);

        for occurrence in &occurrences {
            sink.send(*occurrence);
        }
        watch.cancel();
        fold.cancel();

        prop_assert_eq!(*notified.lock().unwrap(), occurrences.len() + 1);
    }

    /// Property: diff pairs every write with the value before it
    #[test]
    fn prop_diff_pairs_consecutive_values(initial in any::<u16>(), updates in prop::collection::vec(any::<u16>(), 0..30)) {
        let var = Var::new(initial);
        let edges = Arc::new(Mutex::new(Vec::new()));
        let record = edges.clone();
        let subscription = diff(&var.behavior(), |old: u16, new: u16| (old, new))
            .observe(move |edge| record.lock().unwrap().push(edge));

        for update in &updates {
            var.set(*update);
        }
        subscription.cancel();

        let values: Vec<u16> = std::iter::once(initial).chain(updates.iter().copied()).collect();
        let expected: Vec<(u16, u16)> = values.windows(2).map(|w| (w[0], w[1])).collect();
        prop_assert_eq!(edges.lock().unwrap().clone(), expected);
    }
}
