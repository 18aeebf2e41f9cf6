// Logout flow: best-effort upstream notification, unconditional cookie removal
// Author: kelexine (https://github.com/kelexine)

use super::login::configuration_error;
use super::store::TokenStore;
use crate::metrics;
use crate::repository::AuthRepository;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handles `POST /api/auth/logout`.
///
/// Logout always succeeds for the caller: the upstream is told when possible,
/// and both cookies are expired regardless of what the upstream said.
pub struct LogoutHandler {
    auth: Option<Arc<dyn AuthRepository>>,
    store: TokenStore,
}

impl LogoutHandler {
    /// `auth` is `None` when no upstream is configured.
    pub fn new(auth: Option<Arc<dyn AuthRepository>>, store: TokenStore) -> Self {
        Self { auth, store }
    }

    pub async fn handle(&self, jar: CookieJar) -> (CookieJar, Response) {
        let Some(auth) = &self.auth else {
            return (jar, configuration_error());
        };

        let tokens = self.store.read(&jar);
        match tokens.access_token.as_deref() {
            Some(access_token) => {
                match auth.logout(access_token, tokens.refresh_token.as_deref()).await {
                    Ok(()) => metrics::record_logout("notified"),
                    Err(err) => {
                        metrics::record_logout("failed");
                        warn!("Upstream logout failed, clearing cookies anyway: {}", err);
                    }
                }
            }
            None => {
                metrics::record_logout("skipped");
                debug!("No access token on logout, skipping upstream call");
            }
        }

        let body = json!({ "status": "success", "message": "Logout successful" });
        (self.store.clear(jar), (StatusCode::OK, Json(body)).into_response())
    }
}
