//! Canned-response transport that records what it was sent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// One request as the transport saw it, after the middleware chain ran.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Full URL including the query string.
    pub url: String,
    pub headers: Headers,
    /// `None` for GET and DELETE.
    pub body: Option<String>,
}

impl RecordedRequest {
    /// URL without the query string.
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }

    /// Value of a query parameter, undecoded.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        let (_, query) = self.url.split_once('?')?;
        query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == name).then_some(v)
        })
    }

    /// Body parsed as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }
}

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// A response of any status, including 4xx and 5xx.
    Success(Response),
    /// A transport failure, as if the server were unreachable.
    Error(HttpError),
}

impl MockResponse {
    /// Shorthand for a JSON response.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }
}

/// Responses are looked up by method and URL (query string ignored): an exact
/// method-specific match wins, then an exact any-method match, then the
/// longest configured prefix, then the default response.
///
/// # Example
///
/// ```ignore
/// use blog_client::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost:8000/api/blog/tags/",
///     MockResponse::json(200, serde_json::json!([])),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Keyed by `(method or "*", url)`.
    responses: Arc<Mutex<HashMap<(String, String), MockResponse>>>,
    fallback: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

const ANY_METHOD: &str = "*";

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            fallback: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL regardless of method.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert((ANY_METHOD.to_string(), url.to_string()), response);
    }

    /// Set a response for one method on a URL.
    pub fn set_method_response(&self, method: &str, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert((method.to_uppercase(), url.to_string()), response);
    }

    /// Answer for URLs with no configured match.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.fallback.lock().unwrap() = Some(response);
    }

    /// Every request so far, oldest first.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests whose path (query stripped) equals `url`.
    pub fn requests_to(&self, url: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.path() == url)
            .collect()
    }

    fn record(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, method: &str, url: &str) -> Option<MockResponse> {
        let url = url.split('?').next().unwrap_or(url);
        let responses = self.responses.lock().unwrap();

        for key in [method, ANY_METHOD] {
            if let Some(response) = responses.get(&(key.to_string(), url.to_string())) {
                return Some(response.clone());
            }
        }

        let prefix = responses
            .iter()
            .filter(|((m, pattern), _)| {
                (m == method || m == ANY_METHOD) && url.starts_with(pattern.as_str())
            })
            .max_by_key(|((_, pattern), _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix.is_some() {
            return prefix;
        }

        self.fallback.lock().unwrap().clone()
    }

    fn respond(&self, method: &str, url: &str) -> Result<Response, HttpError> {
        match self.get_response(method, url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record("GET", url, headers, None);
        self.respond("GET", url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record("POST", url, headers, Some(body.to_string()));
        self.respond("POST", url)
    }

    async fn patch(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record("PATCH", url, headers, Some(body.to_string()));
        self.respond("PATCH", url)
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record("DELETE", url, headers, None);
        self.respond("DELETE", url)
    }
}
