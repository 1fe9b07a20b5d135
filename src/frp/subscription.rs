// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subscription - Cancellation Handle for Observations
//!
//! Every continuous observation ([`Behavior::observe`](super::Behavior::observe),
//! [`Series::observe`](super::Series::observe)) renews its own callback after
//! each firing. A `Subscription` is the liveness token shared between the
//! caller and that renewal path. The token is read when a callback *fires*,
//! not when it is registered, so an invalidation that was already scheduled
//! before [`cancel`](Subscription::cancel) is dropped on arrival.
//!
//! Dropping a `Subscription` does not cancel it.

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Shared liveness token for an observation
#[derive(Clone)]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
}

impl Subscription {
    /// Create a new, active subscription token
    pub fn new() -> Self {
        Self {
            id: NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Stop the observation; later firings become no-ops
    ///
    /// Cancelling twice is harmless.
    pub fn cancel(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            debug!(subscription = self.id, "subscription cancelled");
        }
    }

    /// Whether the observation is still live
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Process-unique identifier, for logging
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_subscription_is_active() {
        let subscription = Subscription::new();
        assert!(subscription.is_active());
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let subscription = Subscription::new();
        let clone = subscription.clone();

        clone.cancel();
        assert!(!subscription.is_active());
        assert_eq!(subscription.id(), clone.id());

        // Idempotent
        subscription.cancel();
        assert!(!clone.is_active());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Subscription::new();
        let b = Subscription::new();
        assert_ne!(a.id(), b.id());
    }
}
