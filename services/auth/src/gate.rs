//! Access gate consulted before showing any protected view

use common::navigation::{EmployeeView, Route};

use crate::{
    models::{User, is_finance_role},
    session::SessionState,
};

/// Outcome of the access check for one view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The session check is still running; show a neutral waiting state
    Wait,
    /// Show the requested view
    Allow,
    /// Not signed in
    RedirectToLogin,
    /// Signed in, but without the finance role
    ShowRestricted,
}

/// Decide whether the session may see a protected view
pub fn decide(state: &SessionState, requires_finance: bool) -> AccessDecision {
    if state.loading {
        return AccessDecision::Wait;
    }

    if !state.authenticated {
        return AccessDecision::RedirectToLogin;
    }

    if requires_finance && !state.email().is_some_and(is_finance_role) {
        return AccessDecision::ShowRestricted;
    }

    AccessDecision::Allow
}

/// Decide for a route; public routes are always shown
pub fn authorize(state: &SessionState, route: &Route) -> AccessDecision {
    if !route.requires_session() {
        return AccessDecision::Allow;
    }

    decide(state, route.requires_finance())
}

/// Where a freshly signed-in user lands
pub fn landing_route(user: &User) -> Route {
    if is_finance_role(&user.email) {
        Route::Employee(EmployeeView::Dashboard)
    } else {
        Route::InvalidAccess
    }
}

/// Where the login page sends a session that is already signed in
pub fn login_redirect(state: &SessionState) -> Option<Route> {
    if !state.authenticated {
        return None;
    }

    Some(match &state.user {
        Some(user) => landing_route(user),
        None => Route::InvalidAccess,
    })
}
