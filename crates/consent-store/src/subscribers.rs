//! # Subscriber Registry
//!
//! Callbacks registered with [`crate::ConsentStore::subscribe`] live here,
//! keyed by a monotonically assigned [`SubscriptionId`]. Delivery order is
//! unspecified.
//!
//! ## Failure Isolation
//!
//! Callbacks are snapshotted before delivery so the lock is not held while
//! user code runs; a callback may subscribe, unsubscribe or read the store.
//! A callback that panics is caught and logged, and delivery continues with
//! the remaining callbacks.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use consent_core::ConsentRecord;

/// A consent-change callback.
pub type ConsentCallback = dyn Fn(&ConsentRecord) + Send + Sync;

/// Identifies one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "subscription:{}", self.0)
    }
}

/// Outcome of one round of delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryReport {
    /// Callbacks that returned normally.
    pub delivered: usize,
    /// Callbacks that panicked.
    pub failed: usize,
}

#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    next_id: AtomicU64,
    callbacks: RwLock<HashMap<SubscriptionId, Arc<ConsentCallback>>>,
}

impl SubscriberRegistry {
    pub(crate) fn register(&self, callback: Arc<ConsentCallback>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.write().insert(id, callback);
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        self.callbacks.write().remove(&id).is_some()
    }

    pub(crate) fn contains(&self, id: SubscriptionId) -> bool {
        self.callbacks.read().contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.read().len()
    }

    pub(crate) fn notify(&self, record: &ConsentRecord) -> DeliveryReport {
        let snapshot: Vec<(SubscriptionId, Arc<ConsentCallback>)> = self
            .callbacks
            .read()
            .iter()
            .map(|(id, cb)| (*id, Arc::clone(cb)))
            .collect();

        let mut report = DeliveryReport::default();
        for (id, callback) in snapshot {
            match catch_unwind(AssertUnwindSafe(|| (*callback)(record))) {
                Ok(()) => report.delivered += 1,
                Err(_) => {
                    report.failed += 1;
                    tracing::error!(subscription = %id, "consent subscriber panicked; continuing delivery");
                }
            }
        }
        report
    }
}

/// Handle returned by [`crate::ConsentStore::subscribe`].
///
/// Dropping the handle leaves the callback registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<SubscriberRegistry>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, registry: &Arc<SubscriberRegistry>) -> Self {
        Self {
            id,
            registry: Arc::downgrade(registry),
        }
    }

    /// The registration this handle controls.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove exactly this registration. Calling it again, or after the
    /// store is gone, does nothing.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.remove(self.id) {
                tracing::debug!(subscription = %self.id, "consent subscriber removed");
            }
        }
    }

    /// Whether the callback is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }
}

impl std::fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscribers", &self.len())
            .finish()
    }
}
