//! Application error taxonomy shared by the HTTP client, repositories and use cases.
//!
//! Every failure that reaches a caller carries exactly one [`ErrorCode`]. The
//! HTTP client is the only place that turns transport failures and non-2xx
//! statuses into an [`AppError`]; the layers above pass it through untouched.

// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;

/// Field name → validation messages, as returned by the upstream on 422.
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Result alias used by every I/O-touching operation above the HTTP client.
pub type AppResult<T> = std::result::Result<T, AppError>;

const GENERIC_MESSAGE: &str = "An unexpected error occurred";

/// Closed set of semantic error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    #[serde(rename = "UNAUTHORIZED")]
    Unauthorized,
    #[serde(rename = "FORBIDDEN")]
    Forbidden,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    #[serde(rename = "SERVER_ERROR")]
    Server,
    #[serde(rename = "TIMEOUT")]
    Timeout,
    #[serde(rename = "UNKNOWN_ERROR")]
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Network => "NETWORK_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::Server => "SERVER_ERROR",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Type name reported in the serialised form.
    fn error_name(&self) -> &'static str {
        match self {
            ErrorCode::Network => "NetworkError",
            ErrorCode::Unauthorized => "UnauthorizedError",
            ErrorCode::Forbidden => "ForbiddenError",
            ErrorCode::NotFound => "NotFoundError",
            ErrorCode::Validation => "ValidationError",
            ErrorCode::Server => "ServerError",
            ErrorCode::Timeout => "TimeoutError",
            ErrorCode::Unknown => "AppError",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure.
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// HTTP status observed or implied; `0` for failures with no response.
    pub status_code: u16,
    /// Field-level messages, only populated for [`ErrorCode::Validation`].
    pub errors: Option<FieldErrors>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl AppError {
    fn new(code: ErrorCode, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            code,
            message: message.into(),
            status_code,
            errors: None,
            source: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Network, message, 0)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Timeout, message, 408)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message, 401)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message, 403)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message, 404)
    }

    pub fn validation(message: impl Into<String>, errors: Option<FieldErrors>) -> Self {
        Self {
            errors,
            ..Self::new(ErrorCode::Validation, message, 422)
        }
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Server, message, 500)
    }

    pub fn unknown(message: impl Into<String>, status_code: u16) -> Self {
        Self::new(ErrorCode::Unknown, message, status_code)
    }

    /// The repository-level failure for a 2xx body that does not match its schema.
    pub fn unexpected_format() -> Self {
        Self::server("Unexpected response format")
    }

    /// Classify an upstream status code.
    ///
    /// `message` falls back to a per-kind default when the upstream gave none.
    pub fn from_status(status: u16, message: Option<String>, errors: Option<FieldErrors>) -> Self {
        match status {
            401 => Self::unauthorized(message.unwrap_or_else(|| "Your session has expired, please sign in again".to_string())),
            403 => Self::forbidden(message.unwrap_or_else(|| "You do not have access to this resource".to_string())),
            404 => Self::not_found(message.unwrap_or_else(|| "Resource not found".to_string())),
            408 => Self::timeout(message.unwrap_or_else(|| "Request timeout".to_string())),
            422 => Self::validation(
                message.unwrap_or_else(|| "The submitted data is invalid".to_string()),
                errors,
            ),
            500 | 502 | 503 | 504 => Self::server(message.unwrap_or_else(|| "The server encountered an error".to_string())),
            400..=499 => Self::unknown(message.unwrap_or_else(|| "Client error".to_string()), status),
            _ => Self::server(message.unwrap_or_else(|| "The server encountered an error".to_string())),
        }
    }

    /// Attach the underlying cause without changing the classification.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }

    /// Text suitable for inline display; never empty.
    pub fn user_message(&self) -> &str {
        if self.message.trim().is_empty() {
            GENERIC_MESSAGE
        } else {
            &self.message
        }
    }

    /// Serialised form `{name, code, message, statusCode, errors?}`.
    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "name": self.code.error_name(),
            "code": self.code,
            "message": self.message,
            "statusCode": self.status_code,
        });
        if let Some(errors) = &self.errors {
            value["errors"] = json!(errors);
        }
        value
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

// Custom Debug impl: the source chain may embed request URLs, keep it short
impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("status_code", &self.status_code)
            .field("errors", &self.errors)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl Serialize for AppError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

// Used by the gateway's own routes (login); network failures surface as 502
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.status_code {
            0 => StatusCode::BAD_GATEWAY,
            code => StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };

        let mut body = json!({
            "status": "error",
            "code": self.code,
            "message": self.user_message(),
        });
        if let Some(errors) = &self.errors {
            body["errors"] = json!(errors);
        }

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_table() {
        assert_eq!(AppError::from_status(401, None, None).code, ErrorCode::Unauthorized);
        assert_eq!(AppError::from_status(403, None, None).code, ErrorCode::Forbidden);
        assert_eq!(AppError::from_status(404, None, None).code, ErrorCode::NotFound);
        assert_eq!(AppError::from_status(408, None, None).code, ErrorCode::Timeout);
        assert_eq!(AppError::from_status(422, None, None).code, ErrorCode::Validation);
        for status in [500, 502, 503, 504] {
            assert_eq!(AppError::from_status(status, None, None).code, ErrorCode::Server);
        }
        let teapot = AppError::from_status(418, Some("short and stout".to_string()), None);
        assert_eq!(teapot.code, ErrorCode::Unknown);
        assert_eq!(teapot.status_code, 418);
        assert_eq!(AppError::from_status(301, None, None).code, ErrorCode::Server);
        assert_eq!(AppError::from_status(505, None, None).code, ErrorCode::Server);
    }

    #[test]
    fn test_validation_keeps_field_errors() {
        let mut fields = FieldErrors::new();
        fields.insert("title".to_string(), vec!["is required".to_string()]);

        let err = AppError::from_status(422, Some("Invalid".to_string()), Some(fields));
        let json = err.to_json();

        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["statusCode"], 422);
        assert_eq!(json["errors"]["title"][0], "is required");
    }

    #[test]
    fn test_user_message_fallback() {
        assert_eq!(AppError::server("").user_message(), GENERIC_MESSAGE);
        assert_eq!(AppError::not_found("Book 9 not found").user_message(), "Book 9 not found");
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = AppError::network("Unable to connect to the server").with_source(io);

        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.status_code, 0);
        assert!(err.is(ErrorCode::Network));
    }
}
