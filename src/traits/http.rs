//! HTTP transport trait abstraction.
//!
//! The API client never talks to reqwest directly; it goes through
//! [`HttpClient`] so tests can swap in the mock transport.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers (single-valued, lowercase names)
    pub headers: Headers,
    /// Raw `Set-Cookie` header values, one entry per header line
    pub cookies: Vec<String>,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            cookies: Vec::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            cookies: Vec::new(),
            body,
        }
    }

    /// Create a JSON response from a serializable value.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::with_headers(status, headers, Bytes::from(value.to_string()))
    }

    /// Attach a raw `Set-Cookie` value.
    pub fn with_cookie(mut self, set_cookie: impl Into<String>) -> Self {
        self.cookies.push(set_cookie.into());
        self
    }

    /// Header value by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failures. A response with an error status is not an
/// `HttpError`; it comes back as a [`Response`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request timeout: {0}")]
    Timeout(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The body could not be read.
    #[error("IO error: {0}")]
    Io(String),
    #[error("HTTP error: {0}")]
    Other(String),
}

impl HttpError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, HttpError::ConnectionFailed(_) | HttpError::Timeout(_))
    }
}

/// Trait for HTTP transport operations.
///
/// Implementations: [`crate::adapters::ReqwestHttpClient`] for production and
/// [`crate::adapters::mock::MockHttpClient`] for tests.
///
/// # Example
///
/// ```ignore
/// use blog_client::traits::{HttpClient, Headers};
///
/// async fn is_signed_in<C: HttpClient>(client: &C) -> bool {
///     client
///         .get("http://localhost:8000/api/users/current/", &Headers::new())
///         .await
///         .map(|r| r.is_success())
///         .unwrap_or(false)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request with a (possibly empty) body.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a PATCH request.
    async fn patch(&self, url: &str, body: &str, headers: &Headers)
        -> Result<Response, HttpError>;

    /// Perform a DELETE request.
    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_new() {
        let response = Response::new(200, Bytes::from("Hello"));
        assert_eq!(response.status, 200);
        assert!(response.headers.is_empty());
        assert!(response.cookies.is_empty());
        assert_eq!(response.body, Bytes::from("Hello"));
    }

    #[test]
    fn test_response_json_body_sets_content_type() {
        let response = Response::json_body(201, &serde_json::json!({"id": 3}));
        assert_eq!(response.status, 201);
        assert_eq!(
            response.headers.get("content-type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(response.text().unwrap(), r#"{"id":3}"#);
    }

    #[test]
    fn test_response_cookies_keep_duplicates() {
        let response = Response::new(200, Bytes::new())
            .with_cookie("csrftoken=abc; Path=/")
            .with_cookie("sessionid=xyz; HttpOnly; Path=/");
        assert_eq!(response.cookies.len(), 2);
    }

    #[test]
    fn test_response_header_ignores_case() {
        let mut headers = Headers::new();
        headers.insert("x-captcha-key".to_string(), "k1".to_string());
        let response = Response::with_headers(200, headers, Bytes::new());
        assert_eq!(response.header("X-Captcha-Key"), Some("k1"));
        assert_eq!(response.header("content-type"), None);
    }

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(302, Bytes::new()).is_success());
        assert!(!Response::new(401, Bytes::new()).is_success());
        assert!(!Response::new(500, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Like {
            is_liked: bool,
            like_count: u64,
        }

        let response = Response::new(200, Bytes::from(r#"{"is_liked":true,"like_count":4}"#));
        let data: Like = response.json().unwrap();
        assert_eq!(
            data,
            Like {
                is_liked: true,
                like_count: 4
            }
        );
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            HttpError::Timeout("30s".to_string()).to_string(),
            "Request timeout: 30s"
        );
        assert_eq!(
            HttpError::InvalidUrl("bad url".to_string()).to_string(),
            "Invalid URL: bad url"
        );
        assert_eq!(
            HttpError::Other("unknown".to_string()).to_string(),
            "HTTP error: unknown"
        );
    }

    #[test]
    fn test_http_error_transient() {
        assert!(HttpError::ConnectionFailed(String::new()).is_transient());
        assert!(HttpError::Timeout(String::new()).is_transient());
        assert!(!HttpError::InvalidUrl(String::new()).is_transient());
    }
}
