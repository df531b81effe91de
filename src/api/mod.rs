//! HTTP client wrapper used by every state module.
//!
//! - [`ApiClient`] - base URL, transport, ordered middleware chain
//! - [`ApiRequest`] - what middleware can inspect and modify
//! - [`middleware`] - CSRF, XHR marker, cookie replay/capture, 401 handling

mod client;
pub mod middleware;
mod request;

pub use client::ApiClient;
pub use middleware::{
    CaptureCookiesMiddleware, CookieHeaderMiddleware, CsrfTokenMiddleware, RequestMiddleware,
    RequestedWithMiddleware, ResponseMiddleware, UnauthorizedMiddleware,
};
pub use request::{ApiRequest, Method};
