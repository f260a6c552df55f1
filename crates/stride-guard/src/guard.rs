//! The route guard.

use stride_session::AuthStatus;
use tokio::sync::watch;

use crate::{History, Route};

/// Upper bound on redirects followed by [`RouteGuard::navigate`]. A single
/// decision never redirects to a route that redirects again, so two is
/// already generous.
const MAX_REDIRECTS: usize = 4;

/// What the view layer should do for a given path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Status still loading: show a neutral waiting indicator. No content,
    /// no redirect.
    Wait,

    /// Render this route.
    Render(Route),

    /// Navigate elsewhere. `replace` means the current history entry is
    /// overwritten instead of pushed.
    Redirect { to: Route, replace: bool },
}

/// Decides between waiting, rendering and redirecting.
///
/// Stateless: every decision is a pure function of the status and path,
/// so one guard can serve every view.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Creates a guard.
    pub fn new() -> Self {
        Self
    }

    /// Decides what to do with `path` given `status`.
    ///
    /// | status          | `/login`            | protected route      | unknown path         |
    /// |-----------------|---------------------|----------------------|----------------------|
    /// | loading         | Wait                | Wait                 | Wait                 |
    /// | unauthenticated | Render(Login)       | Redirect → `/login`  | Redirect → `/login`  |
    /// | authenticated   | Redirect → `/`      | Render(route)        | Redirect → `/`       |
    ///
    /// Every redirect replaces the history entry.
    pub fn decide(&self, status: AuthStatus, path: &str) -> GuardDecision {
        if status.loading {
            return GuardDecision::Wait;
        }

        let home = if status.is_authenticated {
            Route::Dashboard
        } else {
            Route::Login
        };

        let decision = match Route::parse(path) {
            Some(route) if route.is_protected() == status.is_authenticated => {
                GuardDecision::Render(route)
            }
            _ => GuardDecision::Redirect {
                to: home,
                replace: true,
            },
        };

        tracing::trace!(path, authenticated = status.is_authenticated, ?decision, "guard decision");
        decision
    }

    /// Waits for a definitive status on `status`, then decides.
    ///
    /// If the observer behind the channel is dropped while still loading,
    /// the visitor is treated as unauthenticated.
    pub async fn resolve(
        &self,
        status: &mut watch::Receiver<AuthStatus>,
        path: &str,
    ) -> GuardDecision {
        let resolved = match status.wait_for(|s| !s.loading).await {
            Ok(current) => *current,
            Err(_) => {
                tracing::debug!(path, "auth status channel closed while loading");
                AuthStatus::resolved(false)
            }
        };
        self.decide(resolved, path)
    }

    /// Pushes `path` onto `history` and follows redirects until a route
    /// renders (or the status is still loading).
    ///
    /// Returns the final decision; `history.current()` is where the user
    /// ended up.
    pub fn navigate(&self, history: &mut History, status: AuthStatus, path: &str) -> GuardDecision {
        history.push(path);
        let mut decision = self.decide(status, history.current());
        for _ in 0..MAX_REDIRECTS {
            if !history.apply(decision) {
                break;
            }
            decision = self.decide(status, history.current());
        }
        decision
    }
}
