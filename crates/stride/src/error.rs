//! Unified error type for the Stride crates.

use stride_protocol::ProtocolError;
use stride_session::{SessionError, StorageError};

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum StrideError {
    /// Encoding or decoding a wire type failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Signing in or writing the session failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A storage backend could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The backend refused to create the account. Carries the backend's
    /// message, or a generic fallback.
    #[error("registration rejected: {0}")]
    Registration(String),
}
