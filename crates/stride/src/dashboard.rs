//! `Dashboard` builder and facade.
//!
//! This is the entry point an application holds on to. It ties together
//! the layers: authenticator → session store → observers → guard.

use std::path::PathBuf;
use std::sync::Arc;

use stride_bus::LocalBus;
use stride_guard::{GuardDecision, History, RouteGuard};
use stride_observer::AuthObserver;
use stride_protocol::{Credentials, Registration, UserRecord};
use stride_session::{
    AuthStatus, Authenticator, FileRepository, MemoryRepository, SessionConfig, SessionStore, Tab,
};

use crate::{DashboardConfig, HttpAuthenticator, StrideError};

/// Where the session lives.
enum Storage {
    Memory,
    File(PathBuf),
    Tab(Tab),
}

/// Builder for a [`Dashboard`].
///
/// # Example
///
/// ```rust
/// use stride::prelude::*;
///
/// # fn run() -> Result<(), StrideError> {
/// let origin = Origin::new();
/// let dashboard = Dashboard::builder()
///     .tab(origin.open_tab())
///     .session_config(SessionConfig {
///         announce_login: false,
///         ..SessionConfig::default()
///     })
///     .build_http()?;
/// assert!(!dashboard.status().is_authenticated);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
pub struct DashboardBuilder {
    config: DashboardConfig,
    session_config: SessionConfig,
    storage: Storage,
}

impl DashboardBuilder {
    /// Creates a new builder with default settings and in-memory storage.
    pub fn new() -> Self {
        Self {
            config: DashboardConfig::default(),
            session_config: SessionConfig::default(),
            storage: Storage::Memory,
        }
    }

    /// Sets the backend configuration.
    pub fn config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Keeps the persistent scope in a JSON file at `path`.
    pub fn file_storage(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage = Storage::File(path.into());
        self
    }

    /// Runs inside a browser tab. The dashboard keeps the tab open for as
    /// long as it lives.
    pub fn tab(mut self, tab: Tab) -> Self {
        self.storage = Storage::Tab(tab);
        self
    }

    /// Builds the dashboard with the given authenticator.
    ///
    /// # Errors
    /// Returns [`StrideError::Storage`] if file storage can't be opened.
    pub fn build<A: Authenticator>(self, authenticator: A) -> Result<Dashboard<A>, StrideError> {
        let (store, tab) = match self.storage {
            Storage::Memory => (
                SessionStore::with_config(
                    Arc::new(MemoryRepository::new()),
                    Arc::new(LocalBus::new()),
                    self.session_config,
                ),
                None,
            ),
            Storage::File(path) => (
                SessionStore::with_config(
                    Arc::new(FileRepository::open(&path)?),
                    Arc::new(LocalBus::new()),
                    self.session_config,
                ),
                None,
            ),
            Storage::Tab(tab) => (tab.session_store(self.session_config), Some(tab)),
        };

        tracing::debug!(api = %self.config.api_url, "dashboard built");
        Ok(Dashboard {
            store: Arc::new(store),
            authenticator,
            guard: RouteGuard::new(),
            config: self.config,
            _tab: tab,
        })
    }

    /// Builds the dashboard with an [`HttpAuthenticator`] pointed at the
    /// configured login endpoint.
    pub fn build_http(self) -> Result<Dashboard<HttpAuthenticator>, StrideError> {
        let authenticator = HttpAuthenticator::from_config(&self.config);
        self.build(authenticator)
    }
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One running dashboard: a session store, the authenticator that feeds
/// it, and the guard in front of its views.
pub struct Dashboard<A: Authenticator> {
    store: Arc<SessionStore>,
    authenticator: A,
    guard: RouteGuard,
    config: DashboardConfig,
    _tab: Option<Tab>,
}

impl Dashboard<HttpAuthenticator> {
    /// Creates a new builder.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::new()
    }

    /// Creates an account on the backend. The session is left alone: a new
    /// user signs in afterwards like everyone else.
    pub async fn register(&self, registration: &Registration) -> Result<(), StrideError> {
        self.authenticator.register(registration).await
    }
}

impl<A: Authenticator> Dashboard<A> {
    /// Exchanges credentials for a session and stores it.
    ///
    /// On failure nothing in storage changes and no notification is sent.
    pub async fn sign_in(
        &self,
        credentials: &Credentials,
        remember: bool,
    ) -> Result<UserRecord, StrideError> {
        let user = self
            .store
            .sign_in(&self.authenticator, credentials, remember)
            .await?;
        Ok(user)
    }

    /// Clears the session everywhere and notifies every observer.
    pub fn logout(&self) {
        self.store.logout();
    }

    /// Mounts a new observer on this dashboard's store.
    pub fn mount_observer(&self) -> AuthObserver {
        AuthObserver::mount(Arc::clone(&self.store))
    }

    /// The stored status, read fresh.
    pub fn status(&self) -> AuthStatus {
        self.store.check_auth()
    }

    pub fn current_user(&self) -> Option<UserRecord> {
        self.store.current_user()
    }

    /// Navigates `history` to `path` through the guard, using the status
    /// stored right now.
    pub fn navigate(&self, history: &mut History, path: &str) -> GuardDecision {
        self.guard.navigate(history, self.status(), path)
    }

    pub fn guard(&self) -> RouteGuard {
        self.guard
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }
}
