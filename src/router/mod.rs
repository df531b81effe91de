//! Client-side routing: route table, navigation guard and navigator.

mod guard;
mod location;
mod navigator;
mod routes;

pub use guard::{
    GuardOutcome, NavigationGuard, ADMIN_REQUIRED_MESSAGE, ERROR_PARAM, HOME_PATH, LOGIN_PATH,
    REDIRECT_PARAM,
};
pub use location::Location;
pub use navigator::{Navigator, NavigatorState};
pub use routes::{resolve, Route, RouteMatch, RouteName, NOT_FOUND, ROUTES};

/// The settled result of a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Where the application ended up.
    pub location: Location,
    pub matched: RouteMatch,
    /// Guard decision for the requested location.
    pub outcome: GuardOutcome,
}

/// Guarded navigation over the route table.
#[derive(Debug, Clone)]
pub struct Router {
    guard: NavigationGuard,
    navigator: Navigator,
}

impl Router {
    pub fn new(guard: NavigationGuard, navigator: Navigator) -> Self {
        Self { guard, navigator }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Guard and apply a navigation to `target`.
    ///
    /// Redirect targets are public routes, so at most one redirect is followed.
    pub async fn navigate(&self, target: &str) -> Navigation {
        let requested = Location::parse(target);
        let matched = resolve(requested.path());
        let outcome = self.guard.check(&requested, &matched.route).await;

        let (location, matched) = match &outcome {
            GuardOutcome::Proceed => (requested, matched),
            GuardOutcome::RedirectToLogin(to) | GuardOutcome::RedirectHome(to) => {
                tracing::debug!(from = %requested, to = %to, "Redirecting");
                (to.clone(), resolve(to.path()))
            }
        };

        self.navigator.push(location.clone());
        Navigation {
            location,
            matched,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::ApiClient;
    use crate::state::{SessionContext, UserModule};
    use serde_json::json;
    use std::sync::Arc;

    fn router(mock: &MockHttpClient) -> Router {
        let api = ApiClient::new("http://test.local", Arc::new(mock.clone()));
        let users = UserModule::new(api, SessionContext::new());
        Router::new(NavigationGuard::new(users), Navigator::new())
    }

    #[tokio::test]
    async fn test_navigate_public() {
        let router = router(&MockHttpClient::new());
        let nav = router.navigate("/tag/4").await;
        assert_eq!(nav.matched.route.name, RouteName::Tag);
        assert_eq!(nav.matched.param("id"), Some("4"));
        assert_eq!(router.navigator().current().path(), "/tag/4");
    }

    #[tokio::test]
    async fn test_navigate_protected_lands_on_login() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(401, json!({"message": "no"})));
        let router = router(&mock);

        let nav = router.navigate("/user/profile").await;

        assert_eq!(nav.matched.route.name, RouteName::Login);
        assert_eq!(nav.location.full_path(), "/login?redirect=%2Fuser%2Fprofile");
        assert_eq!(router.navigator().current(), nav.location);
    }

    #[tokio::test]
    async fn test_navigate_unknown_is_not_found() {
        let router = router(&MockHttpClient::new());
        let nav = router.navigate("/missing/page").await;
        assert_eq!(nav.matched.route.name, RouteName::NotFound);
        assert!(nav.outcome.is_proceed());
    }
}
