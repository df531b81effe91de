//! Navigation guard: authentication and staff checks before each navigation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::location::Location;
use super::routes::Route;
use crate::state::UserModule;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const REDIRECT_PARAM: &str = "redirect";
pub const ERROR_PARAM: &str = "error";
pub const ADMIN_REQUIRED_MESSAGE: &str = "You do not have permission to access this page";

/// Result of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    /// `/login?redirect=<original full path>`
    RedirectToLogin(Location),
    /// `/?error=<message>`
    RedirectHome(Location),
}

impl GuardOutcome {
    pub fn is_proceed(&self) -> bool {
        matches!(self, GuardOutcome::Proceed)
    }
}

/// Clears the session-check flag when dropped.
struct CheckFlag<'a> {
    flag: &'a AtomicBool,
}

impl Drop for CheckFlag<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Decides whether a navigation may proceed.
///
/// When a protected route is requested without a session, the guard asks the
/// backend once for the current user. While that check is outstanding other
/// navigations decide on the session as it stands instead of checking again.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    users: UserModule,
    checking: Arc<AtomicBool>,
}

impl NavigationGuard {
    pub fn new(users: UserModule) -> Self {
        Self {
            users,
            checking: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn session_check_in_flight(&self) -> bool {
        self.checking.load(Ordering::SeqCst)
    }

    fn begin_session_check(&self) -> Option<CheckFlag<'_>> {
        self.checking
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| CheckFlag {
                flag: &self.checking,
            })
    }

    pub async fn check(&self, to: &Location, route: &Route) -> GuardOutcome {
        if route.requires_auth && !self.users.is_authenticated() {
            match self.begin_session_check() {
                Some(_flag) => {
                    tracing::debug!(to = %to, "Checking session before protected route");
                    self.users.get_current_user().await;
                }
                None => {
                    tracing::debug!(to = %to, "Session check already running, using current state");
                }
            }
            if !self.users.is_authenticated() {
                tracing::info!(to = %to, route = %route.name, "Sign-in required");
                return GuardOutcome::RedirectToLogin(
                    Location::parse(LOGIN_PATH).with_query(REDIRECT_PARAM, to.full_path()),
                );
            }
        }

        if route.requires_admin && !self.users.is_staff() {
            tracing::info!(to = %to, route = %route.name, "Staff role required");
            return GuardOutcome::RedirectHome(
                Location::parse(HOME_PATH).with_query(ERROR_PARAM, ADMIN_REQUIRED_MESSAGE),
            );
        }

        GuardOutcome::Proceed
    }

    #[cfg(test)]
    fn hold_session_check(&self) -> Option<CheckFlag<'_>> {
        self.begin_session_check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::ApiClient;
    use crate::router::routes::resolve;
    use crate::state::SessionContext;
    use serde_json::json;

    const BASE: &str = "http://test.local";
    const CURRENT: &str = "http://test.local/api/users/current/";

    fn guard(mock: &MockHttpClient) -> NavigationGuard {
        let api = ApiClient::new(BASE, std::sync::Arc::new(mock.clone()));
        NavigationGuard::new(UserModule::new(api, SessionContext::new()))
    }

    async fn check(guard: &NavigationGuard, raw: &str) -> GuardOutcome {
        let to = Location::parse(raw);
        let route = resolve(to.path()).route;
        guard.check(&to, &route).await
    }

    #[tokio::test]
    async fn test_public_route_proceeds_without_session_check() {
        let mock = MockHttpClient::new();
        let guard = guard(&mock);
        assert!(check(&guard, "/article/3").await.is_proceed());
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_auth_route_redirects_with_full_path() {
        let mock = MockHttpClient::new();
        mock.set_response(CURRENT, MockResponse::json(401, json!({"message": "not logged in"})));
        let guard = guard(&mock);

        let outcome = check(&guard, "/user/articles?page=2").await;

        match outcome {
            GuardOutcome::RedirectToLogin(loc) => {
                assert_eq!(loc.path(), LOGIN_PATH);
                assert_eq!(loc.query_param(REDIRECT_PARAM), Some("/user/articles?page=2"));
            }
            other => panic!("expected login redirect, got {:?}", other),
        }
        assert_eq!(mock.requests_to(CURRENT).len(), 1);
        assert!(!guard.session_check_in_flight());
    }

    #[tokio::test]
    async fn test_session_check_restores_session() {
        let mock = MockHttpClient::new();
        mock.set_response(CURRENT, MockResponse::json(200, json!({"id": 1, "username": "ada"})));
        let guard = guard(&mock);

        assert!(check(&guard, "/write").await.is_proceed());
        assert!(check(&guard, "/user").await.is_proceed());
        assert_eq!(mock.requests_to(CURRENT).len(), 1);
    }

    #[tokio::test]
    async fn test_in_flight_session_check_is_not_repeated() {
        let mock = MockHttpClient::new();
        mock.set_response(CURRENT, MockResponse::json(200, json!({"id": 1, "username": "ada"})));
        let guard = guard(&mock);

        let held = guard.hold_session_check();
        assert!(held.is_some());
        let outcome = check(&guard, "/user").await;
        drop(held);

        assert!(matches!(outcome, GuardOutcome::RedirectToLogin(_)));
        assert!(mock.get_requests().is_empty());
        assert!(!guard.session_check_in_flight());
    }

    #[tokio::test]
    async fn test_admin_route_rejects_non_staff() {
        let mock = MockHttpClient::new();
        mock.set_response(
            CURRENT,
            MockResponse::json(200, json!({"id": 1, "username": "ada", "is_staff": false})),
        );
        let guard = guard(&mock);

        match check(&guard, "/admin/users").await {
            GuardOutcome::RedirectHome(loc) => {
                assert_eq!(loc.path(), HOME_PATH);
                assert_eq!(loc.query_param(ERROR_PARAM), Some(ADMIN_REQUIRED_MESSAGE));
            }
            other => panic!("expected home redirect, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_admin_route_allows_staff() {
        let mock = MockHttpClient::new();
        mock.set_response(
            CURRENT,
            MockResponse::json(200, json!({"id": 1, "username": "root", "is_staff": true})),
        );
        let guard = guard(&mock);
        assert!(check(&guard, "/admin/categories").await.is_proceed());
    }
}
