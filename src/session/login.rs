// Login flow: authenticate upstream, keep the tokens in cookies
// Author: kelexine (https://github.com/kelexine)

use super::store::TokenStore;
use crate::metrics;
use crate::models::LoginCredentials;
use crate::repository::AuthRepository;
use crate::usecase::LoginUseCase;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Handles `POST /api/auth/login`. Tokens go into cookies, never into the body.
pub struct LoginHandler {
    login: Option<LoginUseCase>,
    store: TokenStore,
}

impl LoginHandler {
    /// `auth` is `None` when no upstream is configured.
    pub fn new(auth: Option<Arc<dyn AuthRepository>>, store: TokenStore) -> Self {
        Self {
            login: auth.map(LoginUseCase::new),
            store,
        }
    }

    pub async fn handle(&self, jar: CookieJar, credentials: LoginCredentials) -> (CookieJar, Response) {
        let Some(login) = &self.login else {
            return (jar, configuration_error());
        };

        match login.execute(&credentials).await {
            Ok(session) => {
                metrics::record_login(true);
                info!("User {} logged in", session.user.username);

                let jar = self.store.store(jar, &session.tokens());
                let body = json!({
                    "status": "success",
                    "message": "Login successful",
                    "data": {
                        "user": session.user,
                        "expires_at": session.expires_at,
                    }
                });
                (jar, (StatusCode::OK, Json(body)).into_response())
            }
            Err(err) => {
                metrics::record_login(false);
                warn!("Login failed for {}: {}", credentials.username_or_email, err);
                (jar, err.into_response())
            }
        }
    }
}

/// Shared by the login and logout routes when no upstream is configured.
pub(crate) fn configuration_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "error", "message": "Server configuration error" })),
    )
        .into_response()
}
