// Error types for the corpus gateway
// Author: kelexine (https://github.com/kelexine)

mod app_error;

pub use app_error::{AppError, AppResult, ErrorCode, FieldErrors};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Faults raised while starting the gateway or routing a request, before any
/// upstream call has been classified into the [`AppError`] taxonomy.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream base URL is not configured")]
    MissingUpstream,

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Invalid socket address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Convert GatewayError to HTTP responses for Axum
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_type) = match self {
            GatewayError::MissingUpstream => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "error": "Server configuration error" })),
                )
                    .into_response();
            }
            GatewayError::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            GatewayError::Config(_) | GatewayError::ConfigParsing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error"),
        };

        let body = json!({
            "error": error_type,
            "message": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
