// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sources - Externally Driven Producers
//!
//! The engine only composes; something outside it has to decide when values
//! change and when occurrences happen. These are the two stock producers:
//!
//! - [`Var<T>`]: a settable cell exposed as a [`Behavior`]
//! - [`Sink<T>`]: a push point exposed as a [`Series`]

use std::fmt::{self, Debug};
use std::sync::{Arc, Mutex};
use tracing::trace;

use super::{lock, Behavior, Callback, Handler, Series};

struct VarState<T> {
    value: T,
    /// Invalidation closures of the generation currently reading the value
    pending: Vec<Callback>,
}

/// Settable source of a time-varying value
///
/// Every [`set`](Var::set) or [`update`](Var::update) invalidates readers,
/// even when the new value equals the old one. Use
/// [`Behavior::dedup`](super::Behavior::dedup) to suppress those.
pub struct Var<T> {
    state: Arc<Mutex<VarState<T>>>,
    behavior: Behavior<T>,
}

impl<T> Clone for Var<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            behavior: self.behavior.clone(),
        }
    }
}

impl<T: Debug> Debug for Var<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("Var")
            .field("value", &state.value)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Var<T> {
    /// Create a variable holding `value`
    pub fn new(value: T) -> Self {
        let state = Arc::new(Mutex::new(VarState {
            value,
            pending: Vec::new(),
        }));
        let reader = state.clone();
        let behavior = Behavior::new(move |invalidate| {
            let mut state = lock(&reader);
            state.pending.push(invalidate);
            state.value.clone()
        });
        Self { state, behavior }
    }

    /// The variable as a memoized behavior
    ///
    /// All calls return handles to the same behavior.
    pub fn behavior(&self) -> Behavior<T> {
        self.behavior.clone()
    }

    /// Current value, without subscribing
    pub fn get(&self) -> T {
        lock(&self.state).value.clone()
    }

    /// Replace the value and invalidate readers
    pub fn set(&self, value: T) {
        self.update(|_| value);
    }

    /// Replace the value with `f(current)` and invalidate readers
    ///
    /// `f` runs under the variable's lock and must not read this variable.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let pending = {
            let mut state = lock(&self.state);
            state.value = f(state.value.clone());
            std::mem::take(&mut state.pending)
        };

        trace!(callbacks = pending.len(), "var updated");
        for invalidate in pending {
            invalidate();
        }
    }
}

/// Push point of an event stream
///
/// Registrations made through [`series`](Sink::series) queue up in the sink
/// until the next [`send`](Sink::send). Streams hold the sink weakly; once
/// every `Sink` handle is dropped, new registrations are discarded.
pub struct Sink<T> {
    handlers: Arc<Mutex<Vec<Handler<T>>>>,
}

impl<T> Clone for Sink<T> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<T> Debug for Sink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("pending", &lock(&self.handlers).len())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Sink<T> {
    /// Create a sink with no registrations
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Stream of the values sent into this sink
    pub fn series(&self) -> Series<T> {
        let handlers = Arc::downgrade(&self.handlers);
        Series::new(move |handler| {
            if let Some(handlers) = handlers.upgrade() {
                lock(&handlers).push(handler);
            }
        })
    }

    /// Deliver `value` to every queued registration
    ///
    /// The queue is swapped out first, so handlers registering during
    /// delivery wait for the next send.
    pub fn send(&self, value: T) {
        let handlers = std::mem::take(&mut *lock(&self.handlers));
        trace!(handlers = handlers.len(), "sink firing");
        for handler in handlers {
            handler(value.clone());
        }
    }

    /// Number of registrations waiting for the next send
    pub fn pending(&self) -> usize {
        lock(&self.handlers).len()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Sink<T> {
    fn default() -> Self {
        Self::new()
    }
}
