//! Browser origin model: one shared persistent scope, many tabs.
//!
//! In a browser, every tab of an origin sees the same `localStorage` but
//! has its own `sessionStorage`, and a write to `localStorage` fires a
//! `storage` event in every *other* tab (never in the writing tab, and
//! only when the value actually changed). [`Origin`] reproduces that so
//! cross-tab propagation can be exercised without a browser.
//!
//! ```text
//!              Origin (shared persistent scope)
//!             /              |               \
//!        Tab 1            Tab 2            Tab 3
//!   ephemeral + bus   ephemeral + bus   ephemeral + bus
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use stride_bus::{LocalBus, NotificationBus, Topic};

use crate::{Scope, SessionConfig, SessionRepository, SessionStore, StorageError};

/// Counter for generating unique tab IDs.
static NEXT_TAB_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one tab of an [`Origin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

#[derive(Default)]
struct Shared {
    persistent: Mutex<HashMap<String, String>>,
    tabs: Mutex<Vec<(TabId, Weak<LocalBus>)>>,
}

impl Shared {
    fn persistent(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.persistent
            .lock()
            .map_err(|_| StorageError::Unavailable("shared storage lock poisoned".into()))
    }

    fn tabs(&self) -> MutexGuard<'_, Vec<(TabId, Weak<LocalBus>)>> {
        self.tabs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fires the native `storage` event in every open tab except `writer`.
    ///
    /// Buses are collected first and published to after the registry lock
    /// is released, since handlers may open or close tabs.
    fn notify_others(&self, writer: TabId) {
        let buses: Vec<Arc<LocalBus>> = self
            .tabs()
            .iter()
            .filter(|(id, _)| *id != writer)
            .filter_map(|(_, bus)| bus.upgrade())
            .collect();

        tracing::debug!(%writer, tabs = buses.len(), "dispatching storage event to other tabs");
        for bus in buses {
            bus.publish(Topic::StorageChanged);
        }
    }
}

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

/// One browser profile's view of the dashboard's origin.
///
/// Cloning an `Origin` gives another handle to the same shared storage.
#[derive(Clone, Default)]
pub struct Origin {
    shared: Arc<Shared>,
}

impl Origin {
    /// Creates an origin with empty persistent storage and no tabs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new tab with a fresh ephemeral scope and its own bus.
    pub fn open_tab(&self) -> Tab {
        let id = TabId(NEXT_TAB_ID.fetch_add(1, Ordering::Relaxed));
        let bus = Arc::new(LocalBus::new());
        self.shared.tabs().push((id, Arc::downgrade(&bus)));

        let repository = Arc::new(TabRepository {
            tab: id,
            shared: Arc::clone(&self.shared),
            ephemeral: Mutex::new(HashMap::new()),
        });

        tracing::debug!(tab = %id, "tab opened");
        Tab {
            id,
            bus,
            repository,
            shared: Arc::clone(&self.shared),
        }
    }

    /// Number of tabs currently open.
    pub fn open_tabs(&self) -> usize {
        self.shared.tabs().len()
    }
}

// ---------------------------------------------------------------------------
// Tab
// ---------------------------------------------------------------------------

/// One open tab. Closing it (dropping it) stops delivery of storage events
/// to its bus.
pub struct Tab {
    id: TabId,
    bus: Arc<LocalBus>,
    repository: Arc<TabRepository>,
    shared: Arc<Shared>,
}

impl Tab {
    /// This tab's id.
    pub fn id(&self) -> TabId {
        self.id
    }

    /// This tab's notification bus (its `window`).
    pub fn bus(&self) -> Arc<dyn NotificationBus> {
        self.bus.clone()
    }

    /// This tab's view of storage: shared persistent, private ephemeral.
    pub fn repository(&self) -> Arc<dyn SessionRepository> {
        self.repository.clone()
    }

    /// Builds a session store wired to this tab's storage and bus.
    pub fn session_store(&self, config: SessionConfig) -> SessionStore {
        SessionStore::with_config(self.repository(), self.bus(), config)
    }
}

impl Drop for Tab {
    fn drop(&mut self) {
        let id = self.id;
        self.shared.tabs().retain(|(tab, _)| *tab != id);
        tracing::debug!(tab = %id, "tab closed");
    }
}

// ---------------------------------------------------------------------------
// TabRepository
// ---------------------------------------------------------------------------

struct TabRepository {
    tab: TabId,
    shared: Arc<Shared>,
    ephemeral: Mutex<HashMap<String, String>>,
}

impl TabRepository {
    fn ephemeral(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.ephemeral
            .lock()
            .map_err(|_| StorageError::Unavailable("tab storage lock poisoned".into()))
    }
}

impl SessionRepository for TabRepository {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StorageError> {
        match scope {
            Scope::Persistent => Ok(self.shared.persistent()?.get(key).cloned()),
            Scope::Ephemeral => Ok(self.ephemeral()?.get(key).cloned()),
        }
    }

    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<(), StorageError> {
        match scope {
            Scope::Persistent => {
                let previous = self
                    .shared
                    .persistent()?
                    .insert(key.to_string(), value.to_string());
                if previous.as_deref() != Some(value) {
                    self.shared.notify_others(self.tab);
                }
            }
            Scope::Ephemeral => {
                self.ephemeral()?.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    fn remove(&self, scope: Scope, key: &str) -> Result<(), StorageError> {
        match scope {
            Scope::Persistent => {
                let removed = self.shared.persistent()?.remove(key).is_some();
                if removed {
                    self.shared.notify_others(self.tab);
                }
            }
            Scope::Ephemeral => {
                self.ephemeral()?.remove(key);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn count_storage_events(tab: &Tab) -> Arc<AtomicUsize> {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        tab.bus().subscribe(
            Topic::StorageChanged,
            Arc::new(move |_| {
                h.fetch_add(1, Ordering::SeqCst);
            }),
        );
        hits
    }

    #[test]
    fn test_persistent_scope_is_shared_between_tabs() {
        let origin = Origin::new();
        let a = origin.open_tab();
        let b = origin.open_tab();

        a.repository().set(Scope::Persistent, "token", "x").unwrap();

        assert_eq!(
            b.repository().get(Scope::Persistent, "token").unwrap().as_deref(),
            Some("x")
        );
    }

    #[test]
    fn test_ephemeral_scope_is_private_to_tab() {
        let origin = Origin::new();
        let a = origin.open_tab();
        let b = origin.open_tab();

        a.repository().set(Scope::Ephemeral, "token", "x").unwrap();

        assert_eq!(b.repository().get(Scope::Ephemeral, "token").unwrap(), None);
    }

    #[test]
    fn test_persistent_write_notifies_other_tabs_only() {
        let origin = Origin::new();
        let a = origin.open_tab();
        let b = origin.open_tab();
        let a_hits = count_storage_events(&a);
        let b_hits = count_storage_events(&b);

        a.repository().set(Scope::Persistent, "token", "x").unwrap();

        assert_eq!(a_hits.load(Ordering::SeqCst), 0, "writer gets no native event");
        assert_eq!(b_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unchanged_value_and_missing_key_fire_no_event() {
        let origin = Origin::new();
        let a = origin.open_tab();
        let b = origin.open_tab();
        a.repository().set(Scope::Persistent, "token", "x").unwrap();
        let b_hits = count_storage_events(&b);

        a.repository().set(Scope::Persistent, "token", "x").unwrap();
        a.repository().remove(Scope::Persistent, "missing").unwrap();

        assert_eq!(b_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_ephemeral_write_fires_no_event() {
        let origin = Origin::new();
        let a = origin.open_tab();
        let b = origin.open_tab();
        let b_hits = count_storage_events(&b);

        a.repository().set(Scope::Ephemeral, "token", "x").unwrap();

        assert_eq!(b_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_closed_tab_is_unregistered() {
        let origin = Origin::new();
        let a = origin.open_tab();
        let b = origin.open_tab();
        assert_eq!(origin.open_tabs(), 2);

        drop(b);

        assert_eq!(origin.open_tabs(), 1);
        a.repository().set(Scope::Persistent, "token", "x").unwrap();
    }

    #[test]
    fn test_tab_id_display() {
        assert_eq!(TabId(3).to_string(), "tab-3");
    }
}
