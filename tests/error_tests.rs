// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use corpus_gateway::error::{AppError, ErrorCode, FieldErrors, GatewayError};
use http_body_util::BodyExt;
use serde_json::Value;

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_error_display_messages() {
    let errors = vec![
        GatewayError::Config("missing section".to_string()),
        GatewayError::MissingUpstream,
        GatewayError::MethodNotAllowed("TRACE".to_string()),
        GatewayError::InvalidRequest("Bad body".to_string()),
        GatewayError::Internal("boom".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_method_not_allowed_status() {
    let response = GatewayError::MethodNotAllowed("OPTIONS".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_missing_upstream_body() {
    let response = GatewayError::MissingUpstream.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({ "error": "Server configuration error" }));
}

#[tokio::test]
async fn test_invalid_request_body() {
    let response = GatewayError::InvalidRequest("Missing title".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].as_str().unwrap().contains("Missing title"));
}

#[test]
fn test_io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
    let error: GatewayError = io.into();
    assert!(format!("{}", error).contains("port taken"));
}

#[tokio::test]
async fn test_app_error_response_carries_code() {
    let mut fields = FieldErrors::new();
    fields.insert("password".to_string(), vec!["is required".to_string()]);

    let response = AppError::validation("Password is required", Some(fields)).into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Password is required");
    assert_eq!(body["errors"]["password"][0], "is required");
}

#[tokio::test]
async fn test_network_error_is_bad_gateway() {
    let response = AppError::network("Unable to connect to the server").into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = json_body(response).await;
    assert_eq!(body["code"], "NETWORK_ERROR");
    assert!(body.get("errors").is_none());
}

#[test]
fn test_unknown_keeps_status() {
    let error = AppError::from_status(409, Some("Duplicate verse number".to_string()), None);
    assert!(error.is(ErrorCode::Unknown));
    assert_eq!(error.status_code, 409);
    assert_eq!(error.user_message(), "Duplicate verse number");
}

#[test]
fn test_unexpected_format_is_server_error() {
    let error = AppError::unexpected_format();
    assert!(error.is(ErrorCode::Server));
    assert_eq!(error.message, "Unexpected response format");
    assert_eq!(format!("{}", error), "SERVER_ERROR: Unexpected response format");
}
