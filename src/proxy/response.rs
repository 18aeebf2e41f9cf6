// Upstream response capture and translation back to the browser
// Author: kelexine (https://github.com/kelexine)

use axum::body::Body;
use axum::http::header::{HeaderValue, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde_json::{json, Value};

/// What came back from one upstream call, body fully read.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false)
    }

    /// Re-emit for the browser with the upstream status.
    ///
    /// JSON bodies are parsed and re-serialised, so an empty or truncated one
    /// is an error; anything else is passed through with its content type.
    pub fn into_browser_response(self) -> Result<Response, serde_json::Error> {
        if self.is_json() {
            let value: Value = serde_json::from_slice(&self.body)?;
            return Ok((self.status, Json(value)).into_response());
        }

        let content_type = self
            .content_type
            .as_deref()
            .and_then(|ct| HeaderValue::from_str(ct).ok())
            .unwrap_or_else(|| HeaderValue::from_static("text/plain"));

        Ok((self.status, [(CONTENT_TYPE, content_type)], Body::from(self.body)).into_response())
    }
}

/// 504 returned when the request's time budget runs out.
pub fn timeout_response() -> Response {
    (
        StatusCode::GATEWAY_TIMEOUT,
        Json(json!({ "error": "Timeout", "message": "Request timeout" })),
    )
        .into_response()
}

/// 500 returned for transport failures and unreadable upstream bodies.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal Error", "message": "Unable to connect to the server" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(response: Response) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    fn upstream(status: u16, content_type: Option<&str>, body: &'static str) -> UpstreamResponse {
        UpstreamResponse {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: content_type.map(str::to_string),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[tokio::test]
    async fn test_json_is_reemitted_with_status() {
        let response = upstream(422, Some("application/json; charset=utf-8"), r#"{"message":"bad"}"#)
            .into_browser_response()
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let value: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(value, json!({"message": "bad"}));
    }


    #[tokio::test]
    async fn test_non_json_passthrough() {
        let response = upstream(200, Some("text/csv"), "id,title\n1,a\n")
            .into_browser_response()
            .unwrap();
        assert_eq!(response.headers()[CONTENT_TYPE], "text/csv");
        assert_eq!(body_of(response).await, Bytes::from_static(b"id,title\n1,a\n"));

        let response = upstream(502, None, "bad gateway").into_browser_response().unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(upstream(200, Some("application/json"), "{oops").into_browser_response().is_err());
        assert!(upstream(200, Some("application/json"), "").into_browser_response().is_err());
        assert!(upstream(204, Some("application/json"), " ").into_browser_response().is_err());
    }
}
