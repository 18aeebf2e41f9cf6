// reqwest-backed HttpClient
// Author: kelexine (https://github.com/kelexine)

use super::{HttpClient, HttpResponse, Method, RequestOptions};
use crate::config::UpstreamConfig;
use crate::error::{AppError, AppResult, FieldErrors, GatewayError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the pooled reqwest client shared by the proxy and the repositories.
///
/// No client-level timeout is set: every caller bounds its own call.
pub fn build_client(config: &UpstreamConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout())
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true)
        .use_rustls_tls()
        .build()
        .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// JSON-over-HTTP client bound to one base URL.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl ReqwestHttpClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Headers sent on every call; per-call headers still win.
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        for (name, value) in headers.iter() {
            self.default_headers.insert(name.clone(), value.clone());
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URLs and the gateway's own `/api/` routes are used as given.
    pub(crate) fn build_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("/api/") {
            return url.to_string();
        }

        if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> AppResult<HttpResponse> {
        let url = self.build_url(url);

        let mut headers = self.default_headers.clone();
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .headers(headers)
            .timeout(options.timeout.unwrap_or(self.timeout));
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let is_json = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        let text = response.text().await.map_err(classify_transport_error)?;

        let data = if text.is_empty() {
            Value::Null
        } else if is_json {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                // An error page with a JSON content-type still has to surface its status
                Err(_) if !(200..300).contains(&status) => Value::String(text),
                Err(e) => return Err(AppError::unexpected_format().with_source(e)),
            }
        } else {
            Value::String(text)
        };

        if !(200..300).contains(&status) {
            return Err(error_from_body(status, &data));
        }

        Ok(HttpResponse { status, headers, data })
    }
}

/// Map a non-2xx response to the taxonomy.
///
/// The message is the body's `message`, else its `error`, else `HTTP Error {status}`.
pub(crate) fn error_from_body(status: u16, data: &Value) -> AppError {
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| data.get("error").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP Error {}", status));

    let errors = data
        .get("errors")
        .cloned()
        .and_then(|errors| serde_json::from_value::<FieldErrors>(errors).ok());

    AppError::from_status(status, Some(message), errors)
}

fn classify_transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::timeout("Request timeout").with_source(err)
    } else if err.is_connect() {
        AppError::network("Unable to connect to the server").with_source(err)
    } else {
        AppError::network(err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn client() -> ReqwestHttpClient {
        ReqwestHttpClient::new(Client::new(), "https://api.example.com/v1/")
    }

    #[test]
    fn test_build_url() {
        let client = client();
        assert_eq!(client.build_url("/books"), "https://api.example.com/v1/books");
        assert_eq!(client.build_url("books/1"), "https://api.example.com/v1/books/1");
        assert_eq!(client.build_url("http://other.host/x"), "http://other.host/x");
        assert_eq!(client.build_url("/api/proxy/books"), "/api/proxy/books");
    }

    #[test]
    fn test_error_message_precedence() {
        let err = error_from_body(400, &json!({"message": "Bad title", "error": "ignored"}));
        assert_eq!(err.message, "Bad title");
        assert_eq!(err.code, ErrorCode::Unknown);

        let err = error_from_body(403, &json!({"error": "Nope"}));
        assert_eq!(err.message, "Nope");

        let err = error_from_body(503, &Value::String("<html>down</html>".to_string()));
        assert_eq!(err.message, "HTTP Error 503");
        assert_eq!(err.code, ErrorCode::Server);
    }

    #[test]
    fn test_validation_errors_are_collected() {
        let body = json!({
            "message": "Validation failed",
            "errors": {"title": ["is required"], "published_year": ["must be a number"]}
        });
        let err = error_from_body(422, &body);
        let errors = err.errors.unwrap_or_default();
        assert_eq!(errors["title"], vec!["is required".to_string()]);
        assert_eq!(errors.len(), 2);
    }
}
