//! Error types for the session layer.

use stride_protocol::ProtocolError;

/// Errors raised by a [`SessionRepository`](crate::SessionRepository).
///
/// The session store never lets these escape from `check_auth`: an
/// unreadable scope is treated as a scope without a token.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage backend refused access (disabled by the user, lock
    /// poisoned, quota exceeded).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("storage i/o failed: {0}")]
    Io(#[source] std::io::Error),

    /// The backing file exists but does not hold a key/value map.
    #[error("storage file is corrupt: {0}")]
    Corrupt(String),
}

/// Errors that can occur while establishing or describing a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The remote endpoint rejected the credentials. The message is the
    /// one the backend sent, or a generic fallback.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The remote endpoint could not be reached or answered garbage.
    #[error("auth endpoint unreachable: {0}")]
    Unreachable(String),

    /// `login` was called with an empty token. Stored, it would read back
    /// as "logged out".
    #[error("refusing to store an empty token")]
    EmptyToken,

    /// The storage backend failed while writing the session.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The user record could not be encoded for storage.
    #[error(transparent)]
    Codec(#[from] ProtocolError),
}
