//! Session lifecycle against a live HTTP server: login, cookie replay,
//! CSRF mirroring, logout, and the global 401 handler.

mod common;

use blog_client::error::ApiError;
use blog_client::models::LoginRequest;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;

#[tokio::test]
async fn test_login_sets_session_and_cookies_are_replayed() {
    let server = MockServer::start().await;
    mount_login(&server, user_json(1, "ada", false)).await;
    mount_json(&server, "GET", "/api/blog/tags/", 200, json!([])).await;

    let (app, cookies) = app_for(&server);
    app.user
        .login(&LoginRequest::new("ada", "secret"))
        .await
        .unwrap();

    assert!(app.user.is_authenticated());
    assert_eq!(app.user.username().as_deref(), Some("ada"));
    assert_eq!(cookies.snapshot().await.csrf_token(), Some("csrf-123"));

    app.blog.fetch_tags().await.unwrap();

    let login = &received_on(&server, "/api/users/login/").await[0];
    assert_eq!(header(login, "x-csrftoken"), None);
    assert_eq!(header(login, "x-requested-with"), Some("XMLHttpRequest"));

    let tags = &received_on(&server, "/api/blog/tags/").await[0];
    assert_eq!(header(tags, "x-csrftoken"), Some("csrf-123"));
    assert_eq!(header(tags, "cookie"), Some("csrftoken=csrf-123; sessionid=sess-456"));
}

#[tokio::test]
async fn test_bad_credentials() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "POST",
        "/api/users/login/",
        400,
        json!({"non_field_errors": ["Incorrect username or password"]}),
    )
    .await;

    let (app, _) = app_for(&server);
    let err = app
        .user
        .login(&LoginRequest::new("ada", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidCredentials { .. }));
    assert_eq!(err.user_message(), "Incorrect username or password");
    assert!(!app.user.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_session_even_on_server_error() {
    let server = MockServer::start().await;
    mount_login(&server, user_json(1, "ada", false)).await;
    mount_json(&server, "POST", "/api/users/logout/", 500, json!({"error": "boom"})).await;

    let (app, _) = app_for(&server);
    app.user.login(&LoginRequest::new("ada", "pw")).await.unwrap();

    app.user.logout().await;

    assert!(!app.user.is_authenticated());
    assert!(app.user.current_user().is_none());
}

#[tokio::test]
async fn test_401_from_any_endpoint_redirects_to_login_once() {
    let server = MockServer::start().await;
    mount_login(&server, user_json(1, "ada", false)).await;
    Mock::given(method("POST"))
        .and(path("/api/blog/articles/5/like/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Authentication credentials were not provided."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (app, _) = app_for(&server);
    app.user.login(&LoginRequest::new("ada", "pw")).await.unwrap();

    let err = app.blog.like_article(5).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!app.user.is_authenticated());
    assert_eq!(app.navigator().current().path(), "/login");
    assert_eq!(app.navigator().visits("/login"), 1);
    // The handler clears locally; it never calls logout.
    assert!(received_on(&server, "/api/users/logout/").await.is_empty());
}

#[tokio::test]
async fn test_cookie_file_keeps_session_between_runs() {
    let server = MockServer::start().await;
    mount_login(&server, user_json(7, "bob", false)).await;
    mount_json(&server, "GET", "/api/users/current/", 200, user_json(7, "bob", false)).await;

    let dir = TempDir::new().unwrap();
    let jar = dir.path().join("cookies.json");

    let first = app_with_cookie_file(&server, &jar);
    first.user.login(&LoginRequest::new("bob", "pw")).await.unwrap();
    assert!(jar.exists());

    let second = app_with_cookie_file(&server, &jar);
    assert!(!second.user.is_authenticated());
    let user = second.user.get_current_user().await.unwrap();
    assert_eq!(user.id, 7);

    let current = &received_on(&server, "/api/users/current/").await[0];
    assert_eq!(header(current, "cookie"), Some("csrftoken=csrf-123; sessionid=sess-456"));
}

#[tokio::test]
async fn test_sign_out_removes_cookie_file() {
    let server = MockServer::start().await;
    mount_login(&server, user_json(7, "bob", false)).await;
    mount_json(&server, "POST", "/api/users/logout/", 200, json!({"message": "bye"})).await;

    let dir = TempDir::new().unwrap();
    let jar = dir.path().join("nested").join("cookies.json");
    let app = app_with_cookie_file(&server, &jar);
    app.user.login(&LoginRequest::new("bob", "pw")).await.unwrap();

    app.sign_out().await.unwrap();

    assert!(!jar.exists());
    assert!(!app.user.is_authenticated());
}
