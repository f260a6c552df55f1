//! The dashboard's route table.

use std::fmt;

/// Every view the dashboard can show.
///
/// All routes except [`Route::Login`] sit under the protected layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Athletes,
    Plans,
    Workouts,
    Events,
    Ranking,
    Assessments,
}

impl Route {
    /// Every route, login first.
    pub const ALL: [Route; 8] = [
        Route::Login,
        Route::Dashboard,
        Route::Athletes,
        Route::Plans,
        Route::Workouts,
        Route::Events,
        Route::Ranking,
        Route::Assessments,
    ];

    /// The URL path of this route.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/",
            Self::Athletes => "/alunos",
            Self::Plans => "/planilhas",
            Self::Workouts => "/treinos",
            Self::Events => "/eventos",
            Self::Ranking => "/ranking",
            Self::Assessments => "/avaliacoes",
        }
    }

    /// Resolves a URL path to a route.
    ///
    /// Query strings, fragments and a trailing slash are ignored. Returns
    /// `None` for paths the dashboard doesn't know.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Returns `true` for routes that require a session.
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
