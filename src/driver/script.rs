// Copyright (c) 2025 - Cowboy AI, Inc.
//! Scripted sources that replay a fixed sequence

use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::sync::Mutex;
use tracing::debug;

use super::Step;
use crate::errors::{FrpError, FrpResult};
use crate::frp::{lock, Behavior, Series, Sink, Var};

/// A behavior that walks through a list of values
///
/// Starts at the first value; each [`step`](Step::step) moves to the next
/// one and invalidates readers.
pub struct BehaviorScript<T> {
    var: Var<T>,
    upcoming: Mutex<VecDeque<T>>,
}

impl<T: Clone + Send + Sync + 'static> BehaviorScript<T> {
    /// Build a script; fails if `values` is empty
    pub fn new<I>(values: I) -> FrpResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut upcoming: VecDeque<T> = values.into_iter().collect();
        let first = upcoming.pop_front().ok_or(FrpError::EmptyScript)?;
        Ok(Self {
            var: Var::new(first),
            upcoming: Mutex::new(upcoming),
        })
    }

    /// The scripted behavior
    pub fn behavior(&self) -> Behavior<T> {
        self.var.behavior()
    }

    /// Value the script currently holds
    pub fn current(&self) -> T {
        self.var.get()
    }

    /// Values not yet reached
    pub fn remaining(&self) -> usize {
        lock(&self.upcoming).len()
    }
}

impl<T: Clone + Send + Sync + 'static> Step for BehaviorScript<T> {
    fn step(&self) -> bool {
        let (next, remaining) = {
            let mut upcoming = lock(&self.upcoming);
            let next = upcoming.pop_front();
            (next, upcoming.len())
        };
        match next {
            Some(value) => {
                debug!(remaining, "behavior script advancing");
                self.var.set(value);
                true
            }
            None => false,
        }
    }
}

impl<T: Debug> Debug for BehaviorScript<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorScript")
            .field("var", &self.var)
            .field("remaining", &lock(&self.upcoming).len())
            .finish()
    }
}

/// A series that emits a list of values, one per step
pub struct SeriesScript<T> {
    sink: Sink<T>,
    upcoming: Mutex<VecDeque<T>>,
}

impl<T: Clone + Send + Sync + 'static> SeriesScript<T> {
    /// Build a script; fails if `values` is empty
    pub fn new<I>(values: I) -> FrpResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let upcoming: VecDeque<T> = values.into_iter().collect();
        if upcoming.is_empty() {
            return Err(FrpError::EmptyScript);
        }
        Ok(Self {
            sink: Sink::new(),
            upcoming: Mutex::new(upcoming),
        })
    }

    /// The scripted series
    pub fn series(&self) -> Series<T> {
        self.sink.series()
    }

    /// Values not yet emitted
    pub fn remaining(&self) -> usize {
        lock(&self.upcoming).len()
    }
}

impl<T: Clone + Send + Sync + 'static> Step for SeriesScript<T> {
    fn step(&self) -> bool {
        let next = lock(&self.upcoming).pop_front();
        match next {
            Some(value) => {
                debug!(listeners = self.sink.pending(), "series script emitting");
                self.sink.send(value);
                true
            }
            None => false,
        }
    }
}

impl<T: Debug> Debug for SeriesScript<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesScript")
            .field("upcoming", &*lock(&self.upcoming))
            .finish()
    }
}
