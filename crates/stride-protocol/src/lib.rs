//! Wire types for the StrideRun session core.
//!
//! This crate defines the shapes that cross a boundary:
//!
//! - **Types** ([`UserRecord`], [`Credentials`], [`LoginResponse`], etc.):
//!   the request/response bodies of the remote auth endpoint and the user
//!   record that is kept next to the token in browser storage.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those values are
//!   turned into the strings/bytes that storage and HTTP carry.
//! - **Errors** ([`ProtocolError`]): what can go wrong while encoding or
//!   decoding.
//!
//! # Architecture
//!
//! ```text
//! Remote auth endpoint ─(LoginResponse)→ Session store ─(UserRecord JSON)→ Storage scope
//! ```
//!
//! The protocol layer knows nothing about storage scopes or observers. It
//! only knows how values look on the wire.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{Credentials, ErrorBody, LoginResponse, Registration, UserId, UserRecord};
