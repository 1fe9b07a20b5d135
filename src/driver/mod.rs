// Copyright (c) 2025 - Cowboy AI, Inc.
//! Drivers - Feeding the Engine from Outside
//!
//! A driver owns the "when" of a reactive graph: it decides when a source
//! changes value or when an occurrence happens. Scripts replay a fixed
//! sequence one step at a time; the [`Ticker`] steps anything implementing
//! [`Step`] on a tokio interval.
//!
//! ```rust,no_run
//! use cim_frp::driver::{BehaviorScript, Ticker};
//! use cim_frp::frp::Signal;
//! use cim_frp::TickerConfig;
//! use std::sync::Arc;
//!
//! # async fn demo() -> cim_frp::FrpResult<()> {
//! let script = Arc::new(BehaviorScript::new(["Foo", "Bar", "Hello"])?);
//! let lengths = script.behavior().map(|s| s.len());
//! let _watch = lengths.observe(|n| println!("length {n}"));
//!
//! Ticker::new(TickerConfig::default())?.run(script).await?;
//! # Ok(())
//! # }
//! ```

mod script;
mod ticker;

pub use script::{BehaviorScript, SeriesScript};
pub use ticker::Ticker;

use std::sync::Arc;

/// Something that can be advanced one step at a time
pub trait Step: Send + Sync {
    /// Advance once; returns `false` when there was nothing left to do
    fn step(&self) -> bool;
}

impl<S: Step + ?Sized> Step for Arc<S> {
    fn step(&self) -> bool {
        (**self).step()
    }
}

/// A [`Step`] backed by a closure
pub struct StepFn<F>(F);

/// Wrap a closure as a [`Step`]
pub fn step_fn<F>(f: F) -> StepFn<F>
where
    F: Fn() -> bool + Send + Sync,
{
    StepFn(f)
}

impl<F> Step for StepFn<F>
where
    F: Fn() -> bool + Send + Sync,
{
    fn step(&self) -> bool {
        (self.0)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_step_fn() {
        let count = AtomicU32::new(0);
        let step = step_fn(|| count.fetch_add(1, Ordering::SeqCst) < 2);

        assert!(step.step());
        assert!(step.step());
        assert!(!step.step());
    }

    #[test]
    fn test_arc_step_delegates() {
        let script = Arc::new(BehaviorScript::new([1, 2]).unwrap());
        let shared: Arc<dyn Step> = script.clone();

        assert!(shared.step());
        assert!(!shared.step());
        assert_eq!(script.current(), 2);
    }
}
