//! Observer state machine.

use std::fmt;

use stride_session::AuthStatus;

/// Where an observer is in its lifecycle.
///
/// ```text
///            ┌── token present ──→ Authenticated ──┐
///   Init ────┤                        ↑     │      │
///            └── token absent ───→ Unauthenticated ←┘ (logout / token gone)
///                                     (login / token appears)
/// ```
///
/// `Init` is transient. With synchronous storage it never outlives the
/// first check; an async check may hold it across an await.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Init,
    Authenticated,
    Unauthenticated,
}

impl AuthState {
    /// Maps a status onto the state machine.
    pub fn from_status(status: AuthStatus) -> Self {
        match status {
            AuthStatus { loading: true, .. } => Self::Init,
            AuthStatus {
                is_authenticated: true,
                ..
            } => Self::Authenticated,
            AuthStatus {
                is_authenticated: false,
                ..
            } => Self::Unauthenticated,
        }
    }

    /// Returns `true` if moving from `self` to `target` is a legal edge.
    ///
    /// Staying put is always legal; nothing ever goes back to `Init`.
    pub fn can_transition_to(self, target: Self) -> bool {
        match (self, target) {
            (a, b) if a == b => true,
            (_, Self::Init) => false,
            _ => true,
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "Init"),
            Self::Authenticated => write!(f, "Authenticated"),
            Self::Unauthenticated => write!(f, "Unauthenticated"),
        }
    }
}
