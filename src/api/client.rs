//! Shared API client: base URL, transport and middleware chain.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use super::middleware::{RequestMiddleware, ResponseMiddleware};
use super::request::ApiRequest;
use crate::error::{ApiError, ApiResult, ErrorContext};
use crate::traits::{HttpClient, Response};

/// One per application. Cheap to clone; clones share transport and chain.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    request_middleware: Vec<Arc<dyn RequestMiddleware>>,
    response_middleware: Vec<Arc<dyn ResponseMiddleware>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field(
                "request_middleware",
                &self.request_middleware.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field(
                "response_middleware",
                &self.response_middleware.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ApiClient {
    /// Client with an empty middleware chain.
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            request_middleware: Vec::new(),
            response_middleware: Vec::new(),
        }
    }

    pub fn with_request_middleware(mut self, middleware: Arc<dyn RequestMiddleware>) -> Self {
        self.request_middleware.push(middleware);
        self
    }

    pub fn with_response_middleware(mut self, middleware: Arc<dyn ResponseMiddleware>) -> Self {
        self.response_middleware.push(middleware);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run `request` through the chain and the transport.
    ///
    /// Response middleware sees every response, then non-2xx statuses are
    /// turned into an [`ApiError`].
    pub async fn send(&self, mut request: ApiRequest) -> ApiResult<Response> {
        for middleware in &self.request_middleware {
            middleware.on_request(&mut request).await.map_err(|e| {
                e.with_context(
                    ErrorContext::new(middleware.name())
                        .with_module("api")
                        .with_path(request.path.clone()),
                )
            })?;
        }

        let url = request.url(&self.base_url);
        tracing::debug!(method = %request.method, %url, "Sending request");

        let body = request.body.as_deref().unwrap_or("");
        let result = match request.method {
            super::Method::Get => self.http.get(&url, &request.headers).await,
            super::Method::Post => self.http.post(&url, body, &request.headers).await,
            super::Method::Patch => self.http.patch(&url, body, &request.headers).await,
            super::Method::Delete => self.http.delete(&url, &request.headers).await,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(method = %request.method, %url, "Transport failed: {}", e);
                return Err(ApiError::Network(e));
            }
        };

        tracing::debug!(
            method = %request.method,
            %url,
            status = response.status,
            bytes = response.body.len(),
            "Received response"
        );

        for middleware in &self.response_middleware {
            middleware.on_response(&request, &response).await;
        }

        if !response.is_success() {
            return Err(ApiError::from_response(&request.path, &response));
        }
        Ok(response)
    }

    /// Send and decode the JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let path = request.path.clone();
        let response = self.send(request).await?;
        decode(&path, &response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json(ApiRequest::get(path)).await
    }

    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> ApiResult<T> {
        self.send_json(ApiRequest::get(path).query(query)).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::post(path).json(body)?).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json(ApiRequest::post(path)).await
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::patch(path).json(body)?).await
    }

    /// DELETE, ignoring any response body.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(ApiRequest::delete(path)).await.map(|_| ())
    }
}

fn decode<T: DeserializeOwned>(path: &str, response: &Response) -> ApiResult<T> {
    response.json().map_err(|e| {
        ApiError::Decode {
            message: e.to_string(),
        }
        .with_context(ErrorContext::new("decode").with_module("api").with_path(path))
    })
}
