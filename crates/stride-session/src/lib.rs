//! Session management for the StrideRun dashboard.
//!
//! This crate owns everything that touches the persisted session:
//!
//! 1. **Storage**: two key/value scopes behind the [`SessionRepository`]
//!    trait ([`MemoryRepository`], [`FileRepository`], or a browser tab
//!    from an [`Origin`]).
//! 2. **Session store**: [`SessionStore`] reads, writes and clears the
//!    token and user record, and announces changes on the notification bus.
//! 3. **Authentication hook**: the [`Authenticator`] trait for the remote
//!    endpoint that turns credentials into a token.
//!
//! # How it fits in the stack
//!
//! ```text
//! Guard / Observer (above)  ← read AuthStatus, react to notifications
//!     ↕
//! Session Layer (this crate)  ← single authority over the stored session
//!     ↕
//! Bus + Protocol (below)  ← Topic notifications, UserRecord codec
//! ```

mod auth;
mod error;
mod file;
mod origin;
mod repository;
mod session;
mod store;

pub use auth::Authenticator;
pub use error::{SessionError, StorageError};
pub use file::FileRepository;
pub use origin::{Origin, Tab, TabId};
pub use repository::{MemoryRepository, Scope, SessionRepository};
pub use session::{AuthStatus, Session, SessionConfig};
pub use store::SessionStore;
