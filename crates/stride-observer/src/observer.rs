//! The auth observer: one per mounted view.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──→ attach() ──→ … notifications … ──→ detach() / drop
//!  [Init]    [Authenticated | Unauthenticated]     (no listeners left)
//! ```
//!
//! The status is published through a `tokio::sync::watch` channel, so a
//! view can either read [`AuthObserver::status`] synchronously or await
//! changes on the receiver from [`AuthObserver::watch`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use stride_bus::{Handler, SubscriptionId, Topic};
use stride_session::{AuthStatus, SessionError, SessionStore};
use tokio::sync::watch;

use crate::AuthState;

/// Counter for generating unique observer IDs.
static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies an observer in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obs-{}", self.0)
    }
}

/// The two topics every observer listens to.
const TOPICS: [Topic; 2] = [Topic::StorageChanged, Topic::Logout];

/// A reactive view of the session's [`AuthStatus`].
///
/// Subscriptions are tied to [`attach`](Self::attach) and
/// [`detach`](Self::detach), not to memory: a view must detach when it
/// unmounts. Dropping the observer detaches as well, so a forgotten
/// `detach` can't leak listeners on the bus.
pub struct AuthObserver {
    id: ObserverId,
    store: Arc<SessionStore>,
    status: Arc<watch::Sender<AuthStatus>>,
    subscriptions: Mutex<Vec<SubscriptionId>>,
}

impl AuthObserver {
    /// Creates an observer in the `Init` state. Nothing is read or
    /// subscribed until [`attach`](Self::attach).
    pub fn new(store: Arc<SessionStore>) -> Self {
        let (status, _) = watch::channel(AuthStatus::LOADING);
        Self {
            id: ObserverId(NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed)),
            store,
            status: Arc::new(status),
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for `new` followed by `attach`.
    pub fn mount(store: Arc<SessionStore>) -> Self {
        let observer = Self::new(store);
        observer.attach();
        observer
    }

    /// This observer's id.
    pub fn id(&self) -> ObserverId {
        self.id
    }

    // =====================================================================
    // Lifecycle
    // =====================================================================

    /// Subscribes to storage and logout notifications, then resolves the
    /// first check. Calling it again while attached does nothing.
    pub fn attach(&self) {
        {
            let mut subscriptions = self.subscriptions();
            if !subscriptions.is_empty() {
                return;
            }

            let handler = self.handler();
            let bus = self.store.bus();
            subscriptions.extend(
                TOPICS
                    .iter()
                    .map(|topic| bus.subscribe(*topic, Handler::clone(&handler))),
            );
        }
        tracing::debug!(observer = %self.id, "attached");

        self.refresh();
    }

    /// Removes both subscriptions. Idempotent.
    pub fn detach(&self) {
        let ids: Vec<SubscriptionId> = self.subscriptions().drain(..).collect();
        if ids.is_empty() {
            return;
        }
        let bus = self.store.bus();
        for id in ids {
            bus.unsubscribe(id);
        }
        tracing::debug!(observer = %self.id, "detached");
    }

    /// Returns `true` while subscribed.
    pub fn is_attached(&self) -> bool {
        !self.subscriptions().is_empty()
    }

    // =====================================================================
    // Status
    // =====================================================================

    /// The current status.
    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    /// The current state-machine state.
    pub fn state(&self) -> AuthState {
        AuthState::from_status(self.status())
    }

    /// A receiver that sees every status change from now on.
    pub fn watch(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    /// Waits until the first check has resolved and returns the status.
    pub async fn wait_resolved(&self) -> AuthStatus {
        let mut rx = self.watch();
        match rx.wait_for(|status| !status.loading).await {
            Ok(status) => *status,
            // The sender lives in `self`, so the channel can't close while
            // we're borrowed. Fall back to whatever is current.
            Err(_) => self.status(),
        }
    }

    /// Re-reads the store and publishes the result.
    pub fn refresh(&self) {
        apply(self.id, &self.status, self.store.check_auth());
    }

    // =====================================================================
    // Pass-through operations
    // =====================================================================

    /// Stores the token and marks this observer authenticated right away.
    ///
    /// # Errors
    /// See [`SessionStore::login`].
    pub fn login(&self, token: &str, remember: bool) -> Result<(), SessionError> {
        self.store.login(token, remember)?;
        apply(self.id, &self.status, AuthStatus::resolved(true));
        Ok(())
    }

    /// Clears the session. Every attached observer on this bus, this one
    /// included, is unauthenticated when this returns.
    pub fn logout(&self) {
        self.store.logout();
        apply(self.id, &self.status, AuthStatus::resolved(false));
    }

    /// The store this observer reads from.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    // =====================================================================
    // Internals
    // =====================================================================

    /// Builds the bus callback. It holds the store weakly so a handler
    /// left on the bus can never keep the store (and thus the bus) alive.
    fn handler(&self) -> Handler {
        let id = self.id;
        let store: Weak<SessionStore> = Arc::downgrade(&self.store);
        let status = Arc::clone(&self.status);
        Arc::new(move |topic| {
            let Some(store) = store.upgrade() else {
                return;
            };
            tracing::trace!(observer = %id, %topic, "notification received");
            apply(id, &status, store.check_auth());
        })
    }

    fn subscriptions(&self) -> MutexGuard<'_, Vec<SubscriptionId>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for AuthObserver {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Publishes `next` if it differs from the current status. Receivers are
/// only woken on real changes.
fn apply(id: ObserverId, sender: &watch::Sender<AuthStatus>, next: AuthStatus) {
    sender.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        let from = AuthState::from_status(*current);
        let to = AuthState::from_status(next);
        debug_assert!(from.can_transition_to(to), "illegal transition {from} -> {to}");
        tracing::debug!(observer = %id, %from, %to, "auth state changed");
        *current = next;
        true
    });
}
