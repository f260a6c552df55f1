//! The session store: single authority over the persisted session.
//!
//! Every read goes straight to storage. The store keeps no copy of the
//! token, so two stores over the same repository (two views, or two tabs
//! sharing the persistent scope) always agree.
//!
//! # Single-scope invariant
//!
//! A token lives in at most one scope. `login` clears both scopes before
//! writing, `logout` clears both unconditionally. There is no in-place
//! token update: a new token is always logout-then-login.

use std::sync::Arc;

use stride_bus::{NotificationBus, Topic};
use stride_protocol::{Codec, Credentials, JsonCodec, UserRecord};

use crate::{
    AuthStatus, Authenticator, Scope, Session, SessionConfig, SessionError, SessionRepository,
    StorageError,
};

/// Reads, writes and clears the stored session, and announces changes.
///
/// Cheap to share: wrap it in an `Arc` and hand a clone to every observer
/// of the tab.
pub struct SessionStore {
    repository: Arc<dyn SessionRepository>,
    bus: Arc<dyn NotificationBus>,
    codec: JsonCodec,
    config: SessionConfig,
}

impl SessionStore {
    /// Creates a store with the default [`SessionConfig`].
    pub fn new(repository: Arc<dyn SessionRepository>, bus: Arc<dyn NotificationBus>) -> Self {
        Self::with_config(repository, bus, SessionConfig::default())
    }

    /// Creates a store with an explicit config.
    pub fn with_config(
        repository: Arc<dyn SessionRepository>,
        bus: Arc<dyn NotificationBus>,
        config: SessionConfig,
    ) -> Self {
        Self {
            repository,
            bus,
            codec: JsonCodec,
            config,
        }
    }

    /// The bus this store publishes on. Observers subscribe here.
    pub fn bus(&self) -> &Arc<dyn NotificationBus> {
        &self.bus
    }

    /// The active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // =====================================================================
    // Reads
    // =====================================================================

    /// Reports whether a non-empty token is stored in either scope.
    ///
    /// Never fails: an unreadable scope counts as a scope without a token.
    /// The returned status is always resolved (`loading == false`).
    pub fn check_auth(&self) -> AuthStatus {
        AuthStatus::resolved(self.find_token().is_some())
    }

    /// Returns the stored session, if any.
    pub fn session(&self) -> Option<Session> {
        let (scope, token) = self.find_token()?;
        Some(Session {
            token,
            user: self.read_user(scope),
            persistence: scope,
        })
    }

    /// Returns the user record stored next to the token.
    ///
    /// `None` when logged out, when the record hasn't been written yet, or
    /// when it can't be decoded.
    pub fn current_user(&self) -> Option<UserRecord> {
        let (scope, _) = self.find_token()?;
        self.read_user(scope)
    }

    /// Persistent scope first, ephemeral second. Empty strings are ignored
    /// so a crashed half-write reads as "logged out".
    fn find_token(&self) -> Option<(Scope, String)> {
        Scope::ALL.into_iter().find_map(|scope| {
            match self.repository.get(scope, &self.config.token_key) {
                Ok(Some(token)) if !token.is_empty() => Some((scope, token)),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(%scope, error = %e, "token unreadable, treating as absent");
                    None
                }
            }
        })
    }

    fn read_user(&self, scope: Scope) -> Option<UserRecord> {
        let raw = match self.repository.get(scope, &self.config.user_key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(%scope, error = %e, "user record unreadable");
                return None;
            }
        };
        match self.codec.decode_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(%scope, error = %e, "user record undecodable, ignoring");
                None
            }
        }
    }

    // =====================================================================
    // Writes
    // =====================================================================

    /// Stores a freshly issued token.
    ///
    /// Both scopes are cleared first, then the token goes into the
    /// persistent scope if `remember` is set, the ephemeral one otherwise.
    /// With `announce_login` enabled, a `StorageChanged` notification is
    /// published afterwards so other observers in this tab catch up.
    ///
    /// # Errors
    /// - [`SessionError::EmptyToken`]: nothing is touched
    /// - [`SessionError::Storage`]: a scope couldn't be cleared or written;
    ///   whatever was cleared stays cleared, no token is left behind
    pub fn login(&self, token: &str, remember: bool) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        for scope in Scope::ALL {
            self.clear_scope(scope)?;
        }

        let scope = Scope::for_remember(remember);
        self.repository.set(scope, &self.config.token_key, token)?;
        tracing::info!(%scope, "session stored");

        if self.config.announce_login {
            self.bus.publish(Topic::StorageChanged);
        }
        Ok(())
    }

    /// Stores the user record next to the current token.
    ///
    /// Without a session this is a no-op: a record without a token would
    /// describe nobody.
    ///
    /// # Errors
    /// Encoding or storage failures.
    pub fn store_user(&self, user: &UserRecord) -> Result<(), SessionError> {
        let Some((scope, _)) = self.find_token() else {
            tracing::debug!(user = %user.id, "no session, user record not stored");
            return Ok(());
        };
        let encoded = self.codec.encode_to_string(user)?;
        self.repository.set(scope, &self.config.user_key, &encoded)?;
        tracing::debug!(%scope, user = %user.id, "user record stored");
        Ok(())
    }

    /// Exchanges credentials for a token and stores the resulting session.
    ///
    /// On failure the stored session is left exactly as it was.
    ///
    /// # Errors
    /// Whatever the authenticator reports, an invalid response, or a
    /// storage failure while writing.
    pub async fn sign_in<A: Authenticator>(
        &self,
        authenticator: &A,
        credentials: &Credentials,
        remember: bool,
    ) -> Result<UserRecord, SessionError> {
        let response = authenticator.authenticate(credentials).await?;
        response.validate()?;

        self.login(&response.access_token, remember)?;
        self.store_user(&response.user)?;
        tracing::info!(user = %response.user.id, remember, "signed in");
        Ok(response.user)
    }

    /// Clears the session from both scopes and tells every observer.
    ///
    /// Idempotent, and never fails: storage errors are logged and the
    /// notifications go out regardless. Both `StorageChanged` and `Logout`
    /// have been fully dispatched when this returns.
    pub fn logout(&self) {
        for scope in Scope::ALL {
            if let Err(e) = self.clear_scope(scope) {
                tracing::warn!(%scope, error = %e, "could not clear scope on logout");
            }
        }
        tracing::info!("session cleared");

        self.bus.publish(Topic::StorageChanged);
        self.bus.publish(Topic::Logout);
    }

    fn clear_scope(&self, scope: Scope) -> Result<(), StorageError> {
        self.repository.remove(scope, &self.config.token_key)?;
        self.repository.remove(scope, &self.config.user_key)
    }
}

// =========================================================================
// Tests
// =========================================================================
