//! `wiremock` helpers for the blog backend endpoints.

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Mount a JSON response for `verb` on `route`.
pub async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a login endpoint that issues the session and CSRF cookies.
pub async fn mount_login(server: &MockServer, user: Value) {
    Mock::given(method("POST"))
        .and(path("/api/users/login/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Login successful", "user": user}))
                .append_header("Set-Cookie", "csrftoken=csrf-123; Path=/; SameSite=Lax")
                .append_header("Set-Cookie", "sessionid=sess-456; HttpOnly; Path=/"),
        )
        .mount(server)
        .await;
}

/// Requests the server received on `route`, in order.
pub async fn received_on(server: &MockServer, route: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == route)
        .collect()
}

/// Header value on a received request, if present.
pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}
