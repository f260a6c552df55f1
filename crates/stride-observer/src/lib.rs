//! Per-view auth observers for the StrideRun dashboard.
//!
//! Every view that cares about "am I logged in?" mounts an
//! [`AuthObserver`]. The observer reads the session store once, then keeps
//! its [`AuthStatus`](stride_session::AuthStatus) current by listening to
//! the tab's notification bus. Nothing polls.
//!
//! # Key types
//!
//! - [`AuthObserver`]: attach/detach lifecycle, status, login/logout
//! - [`AuthState`]: the observer's state machine

mod observer;
mod state;

pub use observer::{AuthObserver, ObserverId};
pub use state::AuthState;
