//! Storage scopes and the repository abstraction over them.
//!
//! A browser offers two key/value stores per origin: `localStorage`
//! (survives restarts) and `sessionStorage` (dies with the tab). The
//! session store picks one of them based on the "remember me" checkbox.
//! [`SessionRepository`] is that pair of stores as an injected capability,
//! so tests and native builds don't depend on ambient globals.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use crate::StorageError;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Which of the two storage areas an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Survives browser restarts (`localStorage`). Chosen by "remember me".
    Persistent,

    /// Lives only as long as the tab (`sessionStorage`).
    Ephemeral,
}

impl Scope {
    /// Both scopes, in the order `check_auth` reads them.
    pub const ALL: [Scope; 2] = [Scope::Persistent, Scope::Ephemeral];

    /// The scope `login` writes to for a given "remember me" choice.
    pub fn for_remember(remember: bool) -> Self {
        if remember { Self::Persistent } else { Self::Ephemeral }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistent => write!(f, "persistent"),
            Self::Ephemeral => write!(f, "ephemeral"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionRepository
// ---------------------------------------------------------------------------

/// Per-scope string storage.
///
/// Every method may fail: a user can disable storage entirely, and the
/// browser then throws on every access. Callers decide how to degrade.
pub trait SessionRepository: Send + Sync + 'static {
    /// Returns the value stored under `key`, or `None`.
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&self, scope: Scope, key: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// MemoryRepository
// ---------------------------------------------------------------------------

/// Both scopes held in memory. Nothing survives the process.
///
/// This is what a single-tab native build or a unit test uses.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    entries: Mutex<HashMap<(Scope, String), String>>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<(Scope, String), String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".into()))
    }
}

impl SessionRepository for MemoryRepository {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(&(scope, key.to_string())).cloned())
    }

    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?
            .insert((scope, key.to_string()), value.to_string());
        Ok(())
    }

    fn remove(&self, scope: Scope, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(&(scope, key.to_string()));
        Ok(())
    }
}
