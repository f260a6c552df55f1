//! # Stride
//!
//! Client-side session core for the StrideRun coaching dashboard.
//!
//! The dashboard keeps its login in browser storage and lets every mounted
//! view, in every open tab, react when that login appears or goes away.
//! This crate wires the pieces together:
//!
//! - [`stride_session`]: the session store and its storage scopes
//! - [`stride_bus`]: the notification bus views listen on
//! - [`stride_observer`]: per-view reactive auth status
//! - [`stride_guard`]: the route table and guard
//! - [`stride_views`]: derived state for the listing views
//!
//! plus an HTTP [`Authenticator`] for the backend's login endpoint and a
//! [`Dashboard`] facade built by [`DashboardBuilder`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stride::prelude::*;
//!
//! # async fn run() -> Result<(), StrideError> {
//! let dashboard = Dashboard::builder()
//!     .config(DashboardConfig::from_env())
//!     .build_http()?;
//!
//! let observer = dashboard.mount_observer();
//! dashboard
//!     .sign_in(&Credentials::new("coach@example.com", "secret"), true)
//!     .await?;
//! assert!(observer.status().is_authenticated);
//! # Ok(())
//! # }
//! ```

mod config;
mod dashboard;
mod error;
mod http;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardBuilder};
pub use error::StrideError;
pub use http::HttpAuthenticator;

pub use stride_bus as bus;
pub use stride_guard as guard;
pub use stride_observer as observer;
pub use stride_protocol as protocol;
pub use stride_session as session;
pub use stride_views as views;

pub mod prelude {
    pub use crate::{Dashboard, DashboardBuilder, DashboardConfig, HttpAuthenticator, StrideError};

    pub use stride_bus::{LocalBus, NotificationBus, Topic};
    pub use stride_guard::{GuardDecision, History, Route, RouteGuard};
    pub use stride_observer::{AuthObserver, AuthState};
    pub use stride_protocol::{Credentials, LoginResponse, Registration, UserId, UserRecord};
    pub use stride_session::{
        AuthStatus, Authenticator, MemoryRepository, Origin, Scope, SessionConfig, SessionError,
        SessionRepository, SessionStore, StorageError,
    };
}
