//! Request and response middleware.
//!
//! The [`super::ApiClient`] runs request middleware in registration order
//! before handing a request to the transport, and response middleware in
//! registration order on every response it receives (including error
//! statuses).

use async_trait::async_trait;
use std::sync::Arc;

use super::request::ApiRequest;
use crate::error::ApiResult;
use crate::router::{Location, Navigator};
use crate::state::SessionContext;
use crate::traits::{CookieStore, Response};

pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const LOGIN_PATH: &str = "/login";

/// Hook run on every outgoing request.
#[async_trait]
pub trait RequestMiddleware: Send + Sync {
    fn name(&self) -> &'static str;

    async fn on_request(&self, request: &mut ApiRequest) -> ApiResult<()>;
}

/// Hook run on every response the transport delivers.
#[async_trait]
pub trait ResponseMiddleware: Send + Sync {
    fn name(&self) -> &'static str;

    async fn on_response(&self, request: &ApiRequest, response: &Response);
}

/// Mirrors the `csrftoken` cookie into the `X-CSRFToken` header.
pub struct CsrfTokenMiddleware {
    cookies: Arc<dyn CookieStore>,
}

impl CsrfTokenMiddleware {
    pub fn new(cookies: Arc<dyn CookieStore>) -> Self {
        Self { cookies }
    }
}

#[async_trait]
impl RequestMiddleware for CsrfTokenMiddleware {
    fn name(&self) -> &'static str {
        "csrf-token"
    }

    async fn on_request(&self, request: &mut ApiRequest) -> ApiResult<()> {
        let jar = self.cookies.load().await?;
        if let Some(token) = jar.csrf_token() {
            request.set_header(CSRF_HEADER, token);
        }
        Ok(())
    }
}

/// Marks requests as XHR so the backend answers with JSON errors.
pub struct RequestedWithMiddleware;

#[async_trait]
impl RequestMiddleware for RequestedWithMiddleware {
    fn name(&self) -> &'static str {
        "requested-with"
    }

    async fn on_request(&self, request: &mut ApiRequest) -> ApiResult<()> {
        request.set_header(REQUESTED_WITH_HEADER, "XMLHttpRequest");
        request.set_header("Accept", "application/json");
        Ok(())
    }
}

/// Replays stored cookies in the `Cookie` header.
pub struct CookieHeaderMiddleware {
    cookies: Arc<dyn CookieStore>,
}

impl CookieHeaderMiddleware {
    pub fn new(cookies: Arc<dyn CookieStore>) -> Self {
        Self { cookies }
    }
}

#[async_trait]
impl RequestMiddleware for CookieHeaderMiddleware {
    fn name(&self) -> &'static str {
        "cookie-header"
    }

    async fn on_request(&self, request: &mut ApiRequest) -> ApiResult<()> {
        let jar = self.cookies.load().await?;
        if let Some(header) = jar.header_value() {
            request.set_header("Cookie", header);
        }
        Ok(())
    }
}

/// Stores `Set-Cookie` values from responses.
pub struct CaptureCookiesMiddleware {
    cookies: Arc<dyn CookieStore>,
}

impl CaptureCookiesMiddleware {
    pub fn new(cookies: Arc<dyn CookieStore>) -> Self {
        Self { cookies }
    }
}

#[async_trait]
impl ResponseMiddleware for CaptureCookiesMiddleware {
    fn name(&self) -> &'static str {
        "capture-cookies"
    }

    async fn on_response(&self, request: &ApiRequest, response: &Response) {
        if response.cookies.is_empty() {
            return;
        }
        if let Err(e) = self.cookies.apply_set_cookies(&response.cookies).await {
            tracing::warn!(path = %request.path, "Cannot persist cookies: {}", e);
        }
    }
}

/// On 401: drop the session and send the user to the login page.
///
/// The session is cleared locally. Calling the logout endpoint from here
/// could itself answer 401 and re-enter this handler.
pub struct UnauthorizedMiddleware {
    session: SessionContext,
    navigator: Navigator,
}

impl UnauthorizedMiddleware {
    pub fn new(session: SessionContext, navigator: Navigator) -> Self {
        Self { session, navigator }
    }
}

#[async_trait]
impl ResponseMiddleware for UnauthorizedMiddleware {
    fn name(&self) -> &'static str {
        "unauthorized"
    }

    async fn on_response(&self, request: &ApiRequest, response: &Response) {
        if response.status != 401 {
            return;
        }
        tracing::warn!(method = %request.method, path = %request.path, "Received 401, signing out");
        self.session.clear();
        self.navigator.push(Location::parse(LOGIN_PATH));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryCookieStore;
    use crate::traits::CookieJar;
    use bytes::Bytes;

    fn store_with(pairs: &[(&str, &str)]) -> Arc<MemoryCookieStore> {
        let mut jar = CookieJar::new();
        for (k, v) in pairs {
            jar.set(*k, *v);
        }
        Arc::new(MemoryCookieStore::with_jar(jar))
    }

    #[tokio::test]
    async fn test_csrf_header_only_with_cookie() {
        let empty = CsrfTokenMiddleware::new(store_with(&[]));
        let mut req = ApiRequest::post("/api/blog/articles/5/like/");
        empty.on_request(&mut req).await.unwrap();
        assert!(req.header(CSRF_HEADER).is_none());

        let with_token = CsrfTokenMiddleware::new(store_with(&[("csrftoken", "abc")]));
        with_token.on_request(&mut req).await.unwrap();
        assert_eq!(req.header(CSRF_HEADER), Some("abc"));
    }

    #[tokio::test]
    async fn test_cookie_header_replays_jar() {
        let mw =
            CookieHeaderMiddleware::new(store_with(&[("sessionid", "s1"), ("csrftoken", "t")]));
        let mut req = ApiRequest::get("/api/users/current/");
        mw.on_request(&mut req).await.unwrap();
        assert_eq!(req.header("cookie"), Some("csrftoken=t; sessionid=s1"));
    }

    #[tokio::test]
    async fn test_requested_with() {
        let mut req = ApiRequest::get("/");
        RequestedWithMiddleware.on_request(&mut req).await.unwrap();
        assert_eq!(req.header(REQUESTED_WITH_HEADER), Some("XMLHttpRequest"));
    }

    #[tokio::test]
    async fn test_capture_cookies_saves_changes() {
        let store = store_with(&[]);
        let mw = CaptureCookiesMiddleware::new(store.clone());
        let response = Response::new(200, Bytes::new())
            .with_cookie("csrftoken=new; Path=/")
            .with_cookie("sessionid=s9; HttpOnly");

        mw.on_response(&ApiRequest::post("/api/users/login/"), &response)
            .await;

        let jar = store.snapshot().await;
        assert_eq!(jar.csrf_token(), Some("new"));
        assert_eq!(jar.get("sessionid"), Some("s9"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_overlapping_captures_keep_every_cookie() {
        let store = store_with(&[]);
        let mw = Arc::new(CaptureCookiesMiddleware::new(store.clone()));

        let tasks: Vec<_> = (0..24)
            .map(|i| {
                let mw = Arc::clone(&mw);
                tokio::spawn(async move {
                    let response = Response::new(200, Bytes::new())
                        .with_cookie(format!("c{}=v{}; Path=/", i, i));
                    mw.on_response(&ApiRequest::get("/api/system/config/"), &response)
                        .await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.snapshot().await.len(), 24);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_once() {
        let session = SessionContext::new();
        session.set_user(
            serde_json::from_value(serde_json::json!({"id": 1, "username": "ada"})).unwrap(),
        );
        let navigator = Navigator::new();
        let mw = UnauthorizedMiddleware::new(session.clone(), navigator.clone());
        let req = ApiRequest::get("/api/users/profile/");

        mw.on_response(&req, &Response::new(200, Bytes::new())).await;
        assert!(session.is_authenticated());

        mw.on_response(&req, &Response::new(401, Bytes::new())).await;
        assert!(!session.is_authenticated());
        assert_eq!(navigator.current().path(), LOGIN_PATH);
        assert_eq!(navigator.visits(LOGIN_PATH), 1);
    }
}
