//! Navigation targets and the signed-in route guard.

use std::fmt;

use crate::session::SessionTokens;

/// A screen the client can navigate to after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SignIn { redirect_to: Option<String> },
    SignUp,
    Home,
    Itineraries,
    Itinerary(String),
    Blogs,
    Blog(String),
    Staff,
    Settings,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::SignIn { .. } => "/sign-in".to_string(),
            Route::SignUp => "/sign-up".to_string(),
            Route::Home => "/".to_string(),
            Route::Itineraries => "/itineraries".to_string(),
            Route::Itinerary(id) => format!("/itineraries/{id}"),
            Route::Blogs => "/blogs".to_string(),
            Route::Blog(id) => format!("/blogs/{id}"),
            Route::Staff => "/staff".to_string(),
            Route::Settings => "/settings".to_string(),
        }
    }

    /// Routes reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::SignIn { .. } | Route::SignUp)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::SignIn {
                redirect_to: Some(target),
            } => write!(f, "/sign-in?redirect={target}"),
            _ => write!(f, "{}", self.path()),
        }
    }
}

/// Outcome of checking a route against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

/// Decides whether protected content may be shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Protected routes need at least one session token.
    pub fn check(&self, route: &Route, tokens: &SessionTokens) -> GuardDecision {
        if route.is_public() || tokens.has_any() {
            return GuardDecision::Allow;
        }
        log::debug!("No session tokens, redirecting {} to sign-in", route.path());
        GuardDecision::Redirect(Route::SignIn {
            redirect_to: Some(route.path()),
        })
    }
}
