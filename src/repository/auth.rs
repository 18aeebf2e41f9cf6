// Auth repository: login, refresh and logout against the upstream
// Author: kelexine (https://github.com/kelexine)

use super::{decode, encode};
use crate::error::AppResult;
use crate::http::{HttpClient, RequestOptions};
use crate::mappers::auth;
use crate::models::wire::{LoginDto, RefreshDto};
use crate::models::{AuthSession, LoginCredentials, TokenPair};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> AppResult<AuthSession>;

    /// Exchange a refresh token for a fresh pair.
    async fn refresh_token(&self, refresh_token: &str) -> AppResult<TokenPair>;

    /// Invalidate the session upstream.
    async fn logout(&self, access_token: &str, refresh_token: Option<&str>) -> AppResult<()>;
}

pub struct HttpAuthRepository {
    client: Arc<dyn HttpClient>,
}

impl HttpAuthRepository {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn login(&self, credentials: &LoginCredentials) -> AppResult<AuthSession> {
        debug!("Logging in as {}", credentials.username_or_email);
        let response = self
            .client
            .post("/auth/login", encode(credentials)?, RequestOptions::new())
            .await?;

        decode::<LoginDto>(response).map(auth::session_to_domain)
    }

    async fn refresh_token(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let response = self
            .client
            .post(
                "/auth/refresh",
                json!({ "refresh_token": refresh_token }),
                RequestOptions::new(),
            )
            .await?;

        decode::<RefreshDto>(response).map(auth::tokens_to_domain)
    }

    async fn logout(&self, access_token: &str, refresh_token: Option<&str>) -> AppResult<()> {
        self.client
            .post(
                "/auth/logout",
                json!({ "refresh_token": refresh_token }),
                RequestOptions::new().bearer(access_token),
            )
            .await?;
        Ok(())
    }
}
