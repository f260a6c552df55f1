//! Route guarding for the StrideRun dashboard.
//!
//! Protected views render only once the auth status is definitive. While
//! it is loading the guard asks for a neutral waiting indicator; once it
//! resolves, unauthenticated visitors are redirected to `/login` with the
//! history entry *replaced*, so "back" never lands on a guarded view.
//!
//! # Key types
//!
//! - [`Route`]: the dashboard's route table
//! - [`RouteGuard`]: turns `(AuthStatus, path)` into a [`GuardDecision`]
//! - [`History`]: a navigation stack that applies redirects

mod guard;
mod history;
mod route;

pub use guard::{GuardDecision, RouteGuard};
pub use history::History;
pub use route::Route;
