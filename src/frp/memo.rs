// Copyright (c) 2025 - Cowboy AI, Inc.
//! Memo - The Memoizing Evaluation Primitive
//!
//! Every derived [`Behavior`](super::Behavior) is backed by a [`Memo`]: a raw
//! producer plus an optional evaluation [`Context`].
//!
//! # Evaluation Model
//!
//! ```text
//! pull(cb) ──► context live? ──yes──► register cb, return cached value
//!                   │
//!                   no
//!                   ▼
//!          mint generation g, run producer(invalidate[g]),
//!          install Context { callbacks: [cb], value, generation: g }
//!
//! invalidate[g] ──► live generation == g? ──no──► ignore (stale)
//!                   │
//!                   yes
//!                   ▼
//!          clear context, then fire every registered callback
//! ```
//!
//! # Invariants
//!
//! 1. At most one context is live at a time; every pull during its lifetime
//!    returns the same cached value without running the producer.
//! 2. Only the invalidation closure of the live generation can clear it, so
//!    duplicate or late signals produce at most one notification.
//! 3. The context is cleared *before* callbacks run, so a callback that
//!    re-pulls gets a fresh evaluation.
//! 4. The producer and the callbacks never run with the state lock held.

use std::sync::{Arc, Mutex, Weak};
use tracing::trace;

use super::{lock, Callback};

/// Pull side of a behavior
///
/// `None` means the caller samples without subscribing.
pub(crate) trait Pull<T>: Send + Sync {
    fn pull(&self, callback: Option<Callback>) -> T;
}

/// The state of one generation
struct Context<T> {
    /// Callbacks waiting for this generation to end
    callbacks: Vec<Callback>,
    /// Cached result of the producer
    value: T,
    /// Token of the invalidation closure that owns this context
    generation: u64,
}

struct MemoState<T> {
    context: Option<Context<T>>,
    /// Last generation handed out
    generation: u64,
}

/// Memoizing wrapper around a raw producer
pub(crate) struct Memo<T> {
    producer: Box<dyn Fn(Callback) -> T + Send + Sync>,
    state: Mutex<MemoState<T>>,
    this: Weak<Memo<T>>,
}

impl<T: Clone + Send + Sync + 'static> Memo<T> {
    pub(crate) fn new<F>(producer: F) -> Arc<Self>
    where
        F: Fn(Callback) -> T + Send + Sync + 'static,
    {
        Arc::new_cyclic(|this| Self {
            producer: Box::new(producer),
            state: Mutex::new(MemoState {
                context: None,
                generation: 0,
            }),
            this: this.clone(),
        })
    }

    /// Generation of the live context, if any
    #[cfg(test)]
    fn live_generation(&self) -> Option<u64> {
        lock(&self.state).context.as_ref().map(|ctx| ctx.generation)
    }

    /// Invalidation closure bound to `generation`
    ///
    /// Holds the memo weakly: once every handle to the behavior is gone the
    /// closure does nothing.
    fn invalidator(&self, generation: u64) -> Callback {
        let memo = self.this.clone();
        Arc::new(move || {
            if let Some(memo) = memo.upgrade() {
                memo.invalidate(generation);
            }
        })
    }

    fn invalidate(&self, generation: u64) {
        let callbacks = {
            let mut state = lock(&self.state);
            let live = state.context.as_ref().map(|ctx| ctx.generation);
            if live != Some(generation) {
                trace!(generation, ?live, "ignoring stale invalidation");
                return;
            }
            state
                .context
                .take()
                .map(|ctx| ctx.callbacks)
                .unwrap_or_default()
        };

        trace!(generation, callbacks = callbacks.len(), "behavior invalidated");
        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Pull<T> for Memo<T> {
    fn pull(&self, callback: Option<Callback>) -> T {
        let generation = {
            let mut state = lock(&self.state);
            if let Some(ctx) = state.context.as_mut() {
                ctx.callbacks.extend(callback);
                return ctx.value.clone();
            }
            state.generation += 1;
            state.generation
        };

        trace!(generation, "evaluating behavior");
        let value = (self.producer)(self.invalidator(generation));

        let mut state = lock(&self.state);
        match state.context.as_mut() {
            // Another pull installed its context while the producer ran.
            Some(ctx) => {
                trace!(generation, live = ctx.generation, "discarding concurrent evaluation");
                ctx.callbacks.extend(callback);
                ctx.value.clone()
            }
            None => {
                state.context = Some(Context {
                    callbacks: callback.into_iter().collect(),
                    value: value.clone(),
                    generation,
                });
                value
            }
        }
    }
}

/// Producer-less constant; never invalidates
pub(crate) struct Constant<T>(pub(crate) T);

impl<T: Clone + Send + Sync> Pull<T> for Constant<T> {
    fn pull(&self, _callback: Option<Callback>) -> T {
        self.0.clone()
    }
}
