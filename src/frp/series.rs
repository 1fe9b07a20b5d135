// Copyright (c) 2025 - Cowboy AI, Inc.
//! Series - Push-Based Discrete Event Streams
//!
//! A `Series<T>` delivers discrete occurrences to whoever is registered at
//! the moment they happen. It has no current value.
//!
//! # Characteristics
//!
//! - **Discrete**: values exist only at their occurrences
//! - **One-shot registrations**: a registered handler is consumed by the next
//!   occurrence; continuous observation re-registers after every firing
//! - **Stateless**: registration lists belong to the producer and are cleared
//!   per firing cycle
//!
//! # Mathematical Model
//!
//! ```text
//! Series<T> ≅ Handler<T> → ()
//! ```
//!
//! # Examples
//!
//! ```rust
//! use cim_frp::frp::{Signal, Sink};
//! use std::sync::{Arc, Mutex};
//!
//! let sink: Sink<&str> = Sink::new();
//! let lengths = sink.series().map(|s| s.len());
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let record = seen.clone();
//! let subscription = lengths.observe(move |n| record.lock().unwrap().push(n));
//!
//! sink.send("Foo");
//! sink.send("Hello");
//! subscription.cancel();
//! sink.send("ignored");
//!
//! assert_eq!(*seen.lock().unwrap(), vec![3, 5]);
//! ```

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::{Stream, StreamExt};
use std::fmt::{self, Debug};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tracing::trace;

use super::signal::{Discrete, Signal};
use super::{bridge, lock, Behavior, Handler, Subscription};

/// Push-based stream of discrete occurrences
///
/// Cloning a `Series` shares the underlying producer.
pub struct Series<T> {
    register: Arc<dyn Fn(Handler<T>) + Send + Sync>,
}

impl<T> Clone for Series<T> {
    fn clone(&self) -> Self {
        Self {
            register: Arc::clone(&self.register),
        }
    }
}

impl<T> Debug for Series<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Series<{}>", std::any::type_name::<T>())
    }
}

impl<T: Clone + Send + Sync + 'static> Series<T> {
    /// Wrap a raw stream producer
    ///
    /// The producer receives one handler per registration and must invoke it
    /// at most once, at the next occurrence.
    pub fn new<F>(register: F) -> Self
    where
        F: Fn(Handler<T>) + Send + Sync + 'static,
    {
        Self {
            register: Arc::new(register),
        }
    }

    /// A stream that never fires
    pub fn never() -> Self {
        Self::new(|_handler| {})
    }

    /// Register `handler` for the next occurrence, without a cancellation
    /// handle
    pub fn subscribe<H>(&self, handler: H)
    where
        H: Fn(T) + Send + Sync + 'static,
    {
        self.register(Arc::new(handler));
    }

    pub(crate) fn register(&self, handler: Handler<T>) {
        (self.register)(handler)
    }

    /// Keep only occurrences matching `predicate`
    ///
    /// A registration survives non-matching occurrences: it is re-placed on
    /// the source until a matching one consumes it.
    pub fn filter<P>(&self, predicate: P) -> Series<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);
        Series::new(move |handler| {
            source.register(filtered(source.clone(), predicate.clone(), handler));
        })
    }

    /// Occurrences of either stream
    ///
    /// A single registration is consumed by whichever side fires first. An
    /// observer sees the occurrences of both sides, including two caused by
    /// the same upstream event.
    ///
    /// Registrations wait in a list shared by both sides. Each side keeps at
    /// most one relay queued on its source; whichever relay fires first
    /// consumes every waiting registration, and the other relay stays queued
    /// for registrations made later.
    pub fn merge(&self, other: &Series<T>) -> Series<T> {
        let sources = [self.clone(), other.clone()];
        let state = Arc::new(Mutex::new(MergeState {
            waiting: Vec::new(),
            armed: [false; 2],
        }));
        Series::new(move |handler: Handler<T>| {
            let arm = {
                let mut state = lock(&state);
                state.waiting.push(handler);
                let arm = state.armed.map(|armed| !armed);
                state.armed = [true; 2];
                arm
            };
            for (side, source) in sources.iter().enumerate() {
                if arm[side] {
                    source.register(relay(state.clone(), side));
                }
            }
        })
    }

    /// Fold occurrences into a behavior; see [`bridge::accum`]
    pub fn accum<B, F>(&self, seed: B, f: F) -> (Behavior<B>, Subscription)
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(T, B) -> B + Send + Sync + 'static,
    {
        bridge::accum(self, seed, f)
    }

    /// Behavior holding the latest occurrence, `initial` until the first
    pub fn hold(&self, initial: T) -> (Behavior<T>, Subscription) {
        self.accum(initial, |occurrence, _previous| occurrence)
    }

    /// Adapt into an asynchronous [`Stream`]
    ///
    /// Occurrences are buffered in an unbounded channel. Dropping the stream
    /// cancels the underlying observation; the stream ends once the producer
    /// drops its registrations.
    pub fn to_stream(&self) -> SeriesStream<T> {
        let (sender, receiver) = mpsc::unbounded();
        let sender: Mutex<UnboundedSender<T>> = Mutex::new(sender);
        let subscription = self.observe(move |value| {
            if lock(&sender).unbounded_send(value).is_err() {
                trace!("series stream receiver dropped");
            }
        });
        SeriesStream {
            receiver,
            subscription,
        }
    }
}

struct MergeState<T> {
    /// Registrations not yet consumed by either side
    waiting: Vec<Handler<T>>,
    /// Whether each side has a relay queued on its source
    armed: [bool; 2],
}

fn relay<T>(state: Arc<Mutex<MergeState<T>>>, side: usize) -> Handler<T>
where
    T: Clone + Send + Sync + 'static,
{
    Arc::new(move |value: T| {
        let waiting = {
            let mut state = lock(&state);
            state.armed[side] = false;
            std::mem::take(&mut state.waiting)
        };
        for handler in waiting {
            handler(value.clone());
        }
    })
}

fn filtered<T, P>(source: Series<T>, predicate: Arc<P>, handler: Handler<T>) -> Handler<T>
where
    T: Clone + Send + Sync + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    Arc::new(move |value: T| {
        if predicate(&value) {
            handler(value);
        } else {
            source.register(filtered(source.clone(), predicate.clone(), handler.clone()));
        }
    })
}

/// Self-renewing occurrence handler
///
/// Re-registers on the source *before* delivering, so occurrences raised
/// by the consumer itself are not missed.
fn resubscribe<T>(series: Series<T>, handler: Handler<T>, subscription: Subscription) -> Handler<T>
where
    T: Clone + Send + Sync + 'static,
{
    Arc::new(move |value: T| {
        if !subscription.is_active() {
            trace!(subscription = subscription.id(), "dropping occurrence for cancelled observer");
            return;
        }
        series.register(resubscribe(series.clone(), handler.clone(), subscription.clone()));
        handler(value);
    })
}

impl<T: Clone + Send + Sync + 'static> Signal<T> for Series<T> {
    type Mapped<U: Clone + Send + Sync + 'static> = Series<U>;

    fn map<U, F>(&self, f: F) -> Series<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Series::new(move |handler: Handler<U>| {
            let f = f.clone();
            source.register(Arc::new(move |value: T| handler(f(value))));
        })
    }

    /// Deliver every occurrence until cancelled; nothing is delivered up front
    fn observe<H>(&self, handler: H) -> Subscription
    where
        H: Fn(T) + Send + Sync + 'static,
    {
        let subscription = Subscription::new();
        self.register(resubscribe(self.clone(), Arc::new(handler), subscription.clone()));
        subscription
    }
}

impl<T: Clone + Send + Sync + 'static> Discrete<T> for Series<T> {
    /// The returned subscription is spent once the occurrence is delivered
    fn once<H>(&self, handler: H) -> Subscription
    where
        H: Fn(T) + Send + Sync + 'static,
    {
        let subscription = Subscription::new();
        let pending = subscription.clone();
        self.register(Arc::new(move |value: T| {
            if pending.is_active() {
                pending.cancel();
                handler(value);
            }
        }));
        subscription
    }
}

/// [`Stream`] view of a [`Series`], created by [`Series::to_stream`]
pub struct SeriesStream<T> {
    receiver: UnboundedReceiver<T>,
    subscription: Subscription,
}

impl<T> SeriesStream<T> {
    /// The observation feeding this stream
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<T> Stream for SeriesStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.receiver.poll_next_unpin(cx)
    }
}

impl<T> Drop for SeriesStream<T> {
    fn drop(&mut self) {
        self.subscription.cancel();
    }
}

impl<T> Debug for SeriesStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesStream")
            .field("subscription", &self.subscription)
            .finish()
    }
}
