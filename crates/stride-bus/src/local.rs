//! In-process notification bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{Handler, NotificationBus, SubscriptionId, Topic};

/// Counter for generating unique subscription IDs across every bus.
static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

struct Entry {
    id: SubscriptionId,
    topic: Topic,
    handler: Handler,
}

/// A [`NotificationBus`] that dispatches synchronously on the caller's thread.
///
/// One `LocalBus` plays the role of one browser tab's `window`. Handlers
/// run in subscription order, outside the registry lock, so a handler may
/// publish, subscribe or unsubscribe without deadlocking.
#[derive(Default)]
pub struct LocalBus {
    entries: Mutex<Vec<Entry>>,
}

impl LocalBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry holds no invariants a panicking handler could break
    /// (handlers run outside the lock), so a poisoned lock is recovered.
    fn entries(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationBus for LocalBus {
    fn publish(&self, topic: Topic) {
        let handlers: Vec<Handler> = self
            .entries()
            .iter()
            .filter(|e| e.topic == topic)
            .map(|e| Handler::clone(&e.handler))
            .collect();

        tracing::debug!(%topic, subscribers = handlers.len(), "publishing notification");

        for handler in handlers {
            handler(topic);
        }
    }

    fn subscribe(&self, topic: Topic, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId::new(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed));
        self.entries().push(Entry { id, topic, handler });
        tracing::trace!(%topic, subscription = %id, "subscribed");
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;
        if removed {
            tracing::trace!(subscription = %id, "unsubscribed");
        }
        removed
    }

    fn subscriber_count(&self, topic: Topic) -> usize {
        self.entries().iter().filter(|e| e.topic == topic).count()
    }
}
