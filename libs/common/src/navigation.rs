//! Application routes and whole-application navigation

use std::fmt;

use tokio::sync::watch;
use tracing::info;

/// Views available under the employee dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeView {
    Dashboard,
    AllBills,
    AddBill,
    UpdateBill,
    DeleteBill,
    AssignToRoll,
    AssignToDomain,
    StudentBills,
    DeleteStudentBills,
    DeleteSpecificBill,
}

impl EmployeeView {
    const ALL: [EmployeeView; 10] = [
        EmployeeView::Dashboard,
        EmployeeView::AllBills,
        EmployeeView::AddBill,
        EmployeeView::UpdateBill,
        EmployeeView::DeleteBill,
        EmployeeView::AssignToRoll,
        EmployeeView::AssignToDomain,
        EmployeeView::StudentBills,
        EmployeeView::DeleteStudentBills,
        EmployeeView::DeleteSpecificBill,
    ];

    fn path(self) -> &'static str {
        match self {
            EmployeeView::Dashboard => "/employee",
            EmployeeView::AllBills => "/employee/bills/all",
            EmployeeView::AddBill => "/employee/bills/add",
            EmployeeView::UpdateBill => "/employee/bills/update",
            EmployeeView::DeleteBill => "/employee/bills/delete",
            EmployeeView::AssignToRoll => "/employee/student-bills/assign-roll",
            EmployeeView::AssignToDomain => "/employee/student-bills/assign-domain",
            EmployeeView::StudentBills => "/employee/student-bills/view",
            EmployeeView::DeleteStudentBills => "/employee/student-bills/delete-student",
            EmployeeView::DeleteSpecificBill => "/employee/student-bills/delete-specific",
        }
    }
}

/// A top-level location of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login entry point
    Login,
    /// Where the identity provider sends the browser back with a token
    OAuthCallback,
    /// Shown to authenticated users without the finance role
    InvalidAccess,
    /// Finance dashboard and its views
    Employee(EmployeeView),
}

impl Route {
    /// Canonical path of the route
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::OAuthCallback => "/oauth-callback",
            Route::InvalidAccess => "/invalid-access",
            Route::Employee(view) => view.path(),
        }
    }

    /// Resolve a path; the root and unknown paths land on the login page
    pub fn from_path(path: &str) -> Route {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/oauth-callback" => Route::OAuthCallback,
            "/invalid-access" => Route::InvalidAccess,
            other => EmployeeView::ALL
                .into_iter()
                .find(|view| view.path() == other)
                .map(Route::Employee)
                .unwrap_or(Route::Login),
        }
    }

    /// Whether the route is only shown to an authenticated session
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::InvalidAccess | Route::Employee(_))
    }

    /// Whether the route is only shown to the finance role
    pub fn requires_finance(&self) -> bool {
        matches!(self, Route::Employee(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Performs a whole-application route change
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: Route);
}

/// Navigator publishing the current route on a watch channel
#[derive(Debug)]
pub struct NavigationBus {
    current: watch::Sender<Route>,
}

impl NavigationBus {
    /// Create a bus starting at the given route
    pub fn new(start: Route) -> Self {
        let (current, _) = watch::channel(start);
        Self { current }
    }

    /// The route the application is on
    pub fn current(&self) -> Route {
        *self.current.borrow()
    }

    /// Watch route changes
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }
}

impl Default for NavigationBus {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator for NavigationBus {
    fn navigate(&self, to: Route) {
        info!("Navigating to {}", to);
        self.current.send_replace(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip_for_every_view() {
        for view in EmployeeView::ALL {
            let route = Route::Employee(view);
            assert_eq!(Route::from_path(route.path()), route);
        }
        assert_eq!(Route::from_path("/oauth-callback"), Route::OAuthCallback);
        assert_eq!(Route::from_path("/invalid-access/"), Route::InvalidAccess);
    }

    #[test]
    fn root_and_unknown_paths_go_to_login() {
        assert_eq!(Route::from_path("/"), Route::Login);
        assert_eq!(Route::from_path(""), Route::Login);
        assert_eq!(Route::from_path("/employee/nowhere"), Route::Login);
        assert_eq!(Route::from_path("/login"), Route::Login);
    }

    #[test]
    fn route_requirements() {
        assert!(!Route::Login.requires_session());
        assert!(!Route::OAuthCallback.requires_session());
        assert!(Route::InvalidAccess.requires_session());
        assert!(!Route::InvalidAccess.requires_finance());
        assert!(Route::Employee(EmployeeView::AddBill).requires_finance());
    }

    #[tokio::test]
    async fn bus_publishes_navigation() {
        let bus = NavigationBus::new(Route::Employee(EmployeeView::Dashboard));
        let mut changes = bus.subscribe();

        bus.navigate(Route::Login);

        changes.changed().await.expect("bus dropped");
        assert_eq!(*changes.borrow(), Route::Login);
        assert_eq!(bus.current(), Route::Login);
    }
}
