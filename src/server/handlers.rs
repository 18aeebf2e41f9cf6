// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::GatewayError;
use crate::metrics::{self, gather_metrics};
use crate::models::LoginCredentials;
use crate::proxy::{timeout_response, ProxyMethod, ProxyRequest};
use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::time::{timeout_at, Instant};
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Without an upstream every proxied call fails
    let upstream_check = match state.config.upstream_base() {
        Some(base) if state.proxy.is_configured() => HealthCheck {
            status: "ok".to_string(),
            message: format!("Upstream: {}", base),
        },
        _ => {
            overall_status = HealthStatus::Unhealthy;
            HealthCheck {
                status: "error".to_string(),
                message: "Upstream base URL is not configured".to_string(),
            }
        }
    };
    checks.insert("upstream".to_string(), upstream_check);

    let session_check = if state.config.is_production() && !state.config.secure_cookies() {
        if overall_status == HealthStatus::Healthy {
            overall_status = HealthStatus::Degraded;
        }
        HealthCheck {
            status: "warning".to_string(),
            message: "Session cookies are sent without Secure in production".to_string(),
        }
    } else {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Secure cookies: {}", state.config.secure_cookies()),
        }
    };
    checks.insert("session".to_string(), session_check);

    checks.insert(
        "configuration".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "Environment: {}, proxy prefix: {}",
                state.config.environment, state.config.proxy.route_prefix
            ),
        },
    );

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}

/// Every method under the proxy prefix lands here; unsupported ones get 405.
pub async fn proxy_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
) -> Response {
    let started = Instant::now();
    let method = match ProxyMethod::try_from(request.method()) {
        Ok(method) => method,
        Err(err) => return err.into_response(),
    };

    let (parts, body) = request.into_parts();

    // Raw path, so percent-encoding reaches the upstream untouched
    let prefix = state.config.proxy.route_prefix.trim_end_matches('/');
    let path = parts
        .uri
        .path()
        .strip_prefix(prefix)
        .unwrap_or_else(|| parts.uri.path())
        .to_string();

    let read = to_bytes(body, state.config.proxy.max_body_bytes);
    let body = match timeout_at(state.proxy.deadline(started), read).await {
        Ok(Ok(body)) => body,
        Err(_) => {
            warn!("Request body did not arrive before the request deadline");
            metrics::record_proxy_timeout();
            return timeout_response();
        }
        Ok(Err(err)) => {
            warn!("Failed to read proxied request body: {}", err);
            return GatewayError::InvalidRequest(format!("Unreadable request body: {}", err))
                .into_response();
        }
    };

    let request = ProxyRequest {
        method,
        path,
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers,
        body,
    };

    state.proxy.handle(jar, request, started).await.into_response()
}

pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(credentials): Json<LoginCredentials>,
) -> Response {
    state.login.handle(jar, credentials).await.into_response()
}

pub async fn logout_handler(State(state): State<AppState>, jar: CookieJar) -> Response {
    state.logout.handle(jar).await.into_response()
}
