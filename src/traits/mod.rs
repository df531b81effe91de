//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport (GET, POST, PATCH, DELETE)
//! - [`CookieStore`] - Cookie jar persistence

pub mod cookies;
pub mod http;

pub use cookies::{CookieJar, CookieStore, CookieStoreError, CSRF_COOKIE};
pub use http::{Headers, HttpClient, HttpError, Response};
