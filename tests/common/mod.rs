//! Common test utilities for integration tests.
//!
//! Fixtures for backend payloads and helpers to wire a [`BlogApp`] against a
//! `wiremock` server.

pub mod mocks;

pub use mocks::*;

use std::path::Path;
use std::sync::Arc;

use blog_client::adapters::{FileCookieStore, MemoryCookieStore, ReqwestHttpClient};
use blog_client::app::BlogApp;
use blog_client::config::ClientConfig;
use serde_json::{json, Value};
use wiremock::MockServer;

/// A backend user record.
pub fn user_json(id: u64, username: &str, is_staff: bool) -> Value {
    json!({
        "id": id,
        "username": username,
        "nickname": "",
        "email": format!("{}@example.com", username),
        "gender": 0,
        "is_staff": is_staff,
        "is_active": true,
        "article_count": 2,
        "comment_count": 5
    })
}

/// A list-shaped article record.
pub fn article_json(id: u64, like_count: u64) -> Value {
    json!({
        "id": id,
        "title": format!("Article {}", id),
        "summary": "summary",
        "cover_image": null,
        "author": user_json(1, "ada", false),
        "category": {
            "id": 1,
            "name": "Rust",
            "description": "",
            "sort_order": 0,
            "article_count": 3
        },
        "tags": [{"id": 1, "name": "tokio", "color": "#409eff", "use_count": 2}],
        "is_top": false,
        "is_recommend": false,
        "view_count": 10,
        "like_count": like_count,
        "comment_count": 0,
        "published_at": "2024-05-01T12:30:00+08:00",
        "created_at": "2024-05-01T12:00:00+08:00"
    })
}

/// An article page envelope.
pub fn page_json(count: u64, results: Vec<Value>) -> Value {
    json!({"count": count, "next": null, "previous": null, "results": results})
}

/// App talking to `server` over real HTTP with in-memory cookies.
pub fn app_for(server: &MockServer) -> (BlogApp, MemoryCookieStore) {
    let cookies = MemoryCookieStore::new();
    let app = BlogApp::with_parts(
        ClientConfig::new().with_api_url(server.uri()),
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(cookies.clone()),
    );
    (app, cookies)
}

/// App talking to `server` with cookies persisted at `cookie_file`.
pub fn app_with_cookie_file(server: &MockServer, cookie_file: &Path) -> BlogApp {
    BlogApp::with_parts(
        ClientConfig::new().with_api_url(server.uri()),
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(FileCookieStore::with_path(cookie_file)),
    )
}
