//! Session guard and panel routes
//!
//! Dashboard routes require a stored token. Anything else is redirected to
//! the login route with the attempted location captured in `from`.

use crate::session::{Session, SessionStore};
use std::fmt;

/// Panel locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Clients,
    DatabaseManagement,
    ChangePassword,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard => "/dashboard",
            Route::Clients => "/dashboard/clients",
            Route::DatabaseManagement => "/dashboard/database-management",
            Route::ChangePassword => "/dashboard/change-password",
        }
    }

    /// Resolve a path. Unknown dashboard paths fall back to the dashboard
    /// root; anything outside the dashboard is the login page.
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        match path {
            "/dashboard" => Route::Dashboard,
            "/dashboard/clients" => Route::Clients,
            "/dashboard/database-management" => Route::DatabaseManagement,
            "/dashboard/change-password" => Route::ChangePassword,
            p if p.starts_with("/dashboard/") => Route::Dashboard,
            _ => Route::Login,
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone)]
pub enum GuardDecision {
    /// Render the route; the session is available for authenticated calls
    Allow(Option<Session>),
    /// Send the operator to `to`, remembering where they were going
    Redirect { to: Route, from: Route },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow(_))
    }

    pub fn session(self) -> Option<Session> {
        match self {
            GuardDecision::Allow(session) => session,
            GuardDecision::Redirect { .. } => None,
        }
    }
}

/// Gates dashboard routes behind a persisted token
#[derive(Debug, Clone)]
pub struct SessionGuard {
    store: SessionStore,
}

impl SessionGuard {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Decide whether `route` may render.
    ///
    /// A token whose own `exp` claim has passed counts as absent, and the
    /// stored state is wiped.
    pub fn check(&self, route: Route) -> GuardDecision {
        if !route.requires_auth() {
            return GuardDecision::Allow(Session::load(self.store.clone()));
        }
        match Session::load(self.store.clone()) {
            Some(session) if session.is_expired() => {
                tracing::info!(route = %route, "Stored session expired");
                if let Err(e) = session.clear() {
                    tracing::warn!(error = %e, "Failed to clear expired session");
                }
                GuardDecision::Redirect {
                    to: Route::Login,
                    from: route,
                }
            }
            Some(session) => GuardDecision::Allow(Some(session)),
            None => GuardDecision::Redirect {
                to: Route::Login,
                from: route,
            },
        }
    }
}
