//! Session types: what is stored, what observers see, and how the store
//! is configured.

use stride_protocol::UserRecord;

use crate::Scope;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Whether `login` re-dispatches a `StorageChanged` notification in the
    /// current tab, the way `logout` does.
    ///
    /// Default: `true`. Set to `false` to get the historical behavior where
    /// only the observer that called `login` learns about it.
    pub announce_login: bool,

    /// Storage key holding the access token.
    pub token_key: String,

    /// Storage key holding the serialized user record.
    pub user_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            announce_login: true,
            token_key: "token".to_string(),
            user_key: "user".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// AuthStatus
// ---------------------------------------------------------------------------

/// What a view needs to decide between spinner, content and redirect.
///
/// Derived from storage on every check, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthStatus {
    pub is_authenticated: bool,

    /// `true` only until the first check resolves.
    pub loading: bool,
}

impl AuthStatus {
    /// The status every observer starts in, before its first check.
    pub const LOADING: Self = Self {
        is_authenticated: false,
        loading: true,
    };

    /// A resolved status.
    pub const fn resolved(is_authenticated: bool) -> Self {
        Self {
            is_authenticated,
            loading: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Snapshot of the stored session.
///
/// Only exists while a non-empty token is stored. `user` may be `None`
/// even then: the record is written after the token and can lag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: Option<UserRecord>,
    pub persistence: Scope,
}
