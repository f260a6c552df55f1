//! Error types for the protocol layer.
//!
//! Each crate in the workspace defines its own error enum. A
//! `ProtocolError` always means the problem is in turning values into
//! bytes or back, never in storage or networking.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into JSON).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning stored or received JSON into a value).
    ///
    /// Common causes: a user record written by an older build, a truncated
    /// storage entry, or an error page returned where JSON was expected.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The value decoded fine but violates a protocol rule, e.g. a login
    /// response carrying an empty `access_token`.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
