//! HTTP client abstraction used by the repositories.
//!
//! [`HttpClient`] is the single point where transport failures and non-2xx
//! statuses become an [`AppError`](crate::error::AppError). Repositories depend
//! on the trait so tests can swap in a scripted implementation.

// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::{build_client, ReqwestHttpClient, DEFAULT_TIMEOUT};

use crate::error::AppResult;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
pub use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Per-call options layered over the client's defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers; these win over the client's default headers.
    pub headers: HeaderMap,
    /// Overrides the client's default timeout for this call only.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach `Authorization: Bearer <token>`.
    pub fn bearer(self, token: &str) -> Self {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                self.header(AUTHORIZATION, value)
            }
            Err(_) => {
                warn!("Access token contains characters not allowed in a header, sending without it");
                self
            }
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Parsed JSON body, or the raw text as a JSON string for non-JSON responses.
    /// An empty body is `Value::Null`.
    pub data: Value,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a request. `url` is relative to the client's base URL unless absolute.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> AppResult<HttpResponse>;

    async fn get(&self, url: &str, options: RequestOptions) -> AppResult<HttpResponse> {
        self.request(Method::GET, url, None, options).await
    }

    async fn post(&self, url: &str, body: Value, options: RequestOptions) -> AppResult<HttpResponse> {
        self.request(Method::POST, url, Some(body), options).await
    }

    async fn put(&self, url: &str, body: Value, options: RequestOptions) -> AppResult<HttpResponse> {
        self.request(Method::PUT, url, Some(body), options).await
    }

    async fn patch(&self, url: &str, body: Value, options: RequestOptions) -> AppResult<HttpResponse> {
        self.request(Method::PATCH, url, Some(body), options).await
    }

    async fn delete(&self, url: &str, options: RequestOptions) -> AppResult<HttpResponse> {
        self.request(Method::DELETE, url, None, options).await
    }
}
