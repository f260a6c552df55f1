//! Notification bus for session changes.
//!
//! In the browser, views learn about session changes from two window
//! events: the native `storage` event (fired in *other* tabs when shared
//! storage is written) and an app-defined `logout` event. This crate
//! replaces those ambient globals with an explicit [`NotificationBus`]
//! that is injected into the session store and every observer.
//!
//! Notifications carry no payload. A subscriber that hears one re-reads
//! storage to find out what changed.

mod local;

pub use local::LocalBus;

use std::fmt;
use std::sync::Arc;

/// Opaque identifier for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new `SubscriptionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// The channels a notification can be published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Some storage scope was written. Delivered natively to other tabs,
    /// and re-dispatched by hand inside the tab that logged out.
    StorageChanged,

    /// An explicit logout happened in this tab.
    Logout,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageChanged => write!(f, "storage"),
            Self::Logout => write!(f, "logout"),
        }
    }
}

/// Callback invoked when a subscribed topic is published.
///
/// Receives the topic so one handler can serve several subscriptions.
pub type Handler = Arc<dyn Fn(Topic) + Send + Sync>;

/// Publish/subscribe for payload-free session notifications.
///
/// The trait is object safe: the session store and observers hold an
/// `Arc<dyn NotificationBus>` so a tab's bus can be shared without
/// generics leaking into every type.
pub trait NotificationBus: Send + Sync + 'static {
    /// Delivers `topic` to every current subscriber of that topic.
    ///
    /// Returns only after every handler has run.
    fn publish(&self, topic: Topic);

    /// Registers `handler` for `topic` and returns the id needed to remove it.
    fn subscribe(&self, topic: Topic, handler: Handler) -> SubscriptionId;

    /// Removes a subscription.
    ///
    /// Returns `false` if the id was unknown or already removed. That is
    /// not an error: teardown is allowed to run more than once.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Number of live subscriptions on `topic`.
    fn subscriber_count(&self, topic: Topic) -> usize;
}
