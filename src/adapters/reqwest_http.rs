//! Reqwest-based HTTP client adapter.
//!
//! Production implementation of the [`HttpClient`] trait from `crate::traits`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::Method;
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// HTTP client implementation using reqwest.
///
/// Cookies are not handled by reqwest here; the API client's middleware
/// chain owns the jar so it can be persisted and inspected.
///
/// # Example
///
/// ```ignore
/// use blog_client::adapters::ReqwestHttpClient;
/// use blog_client::traits::{Headers, HttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let response = client.get("http://localhost:8000/api/blog/tags/", &Headers::new()).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Build a client with an optional overall request timeout.
    ///
    /// `None` keeps the transport default (no timeout).
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let builder = match timeout {
            Some(timeout) => reqwest::Client::builder().timeout(timeout),
            None => reqwest::Client::builder(),
        };
        builder
            .build()
            .map(|client| Self { client })
            .map_err(|e| HttpError::Other(e.to_string()))
    }

    fn classify(err: reqwest::Error) -> HttpError {
        let message = err.to_string();
        if err.is_timeout() {
            HttpError::Timeout(message)
        } else if err.is_connect() {
            HttpError::ConnectionFailed(message)
        } else if err.is_builder() {
            HttpError::InvalidUrl(message)
        } else if err.is_body() || err.is_decode() {
            HttpError::Io(message)
        } else {
            HttpError::Other(message)
        }
    }

    /// Single-valued view of the response headers.
    fn header_map(headers: &HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect()
    }

    /// Every `Set-Cookie` line; [`Self::header_map`] keeps only one.
    fn set_cookies(headers: &HeaderMap) -> Vec<String> {
        headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect()
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let mut request = headers
            .iter()
            .fold(self.client.request(method.clone(), url), |req, (k, v)| {
                req.header(k, v)
            });
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(Self::classify)?;
        let status = response.status().as_u16();
        tracing::debug!(%method, url, status, "HTTP exchange");

        let response_headers = Self::header_map(response.headers());
        let cookies = Self::set_cookies(response.headers());
        let body = response.bytes().await.map_err(Self::classify)?;

        let mut out = Response::with_headers(status, response_headers, body);
        out.cookies = cookies;
        Ok(out)
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.dispatch(Method::GET, url, None, headers).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.dispatch(Method::POST, url, Some(body), headers).await
    }

    async fn patch(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.dispatch(Method::PATCH, url, Some(body), headers).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.dispatch(Method::DELETE, url, None, headers).await
    }
}
