// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{health_handler, login_handler, logout_handler, metrics_handler, proxy_handler};
use super::middleware::request_id_layers;
use crate::config::AppConfig;
use crate::error::Result;
use crate::http::{build_client, ReqwestHttpClient};
use crate::proxy::ProxyHandler;
use crate::repository::{AuthRepository, HttpAuthRepository};
use crate::session::{LoginHandler, LogoutHandler, TokenStore};
use axum::{
    routing::{any, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub proxy: Arc<ProxyHandler>,
    pub login: Arc<LoginHandler>,
    pub logout: Arc<LogoutHandler>,
}

impl AppState {
    /// Wire the handlers to one shared connection pool.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let client = build_client(&config.upstream)?;

        let auth: Option<Arc<dyn AuthRepository>> = config.upstream_base().map(|base| {
            let http = ReqwestHttpClient::new(client.clone(), base).with_timeout(config.upstream.timeout());
            Arc::new(HttpAuthRepository::new(Arc::new(http))) as Arc<dyn AuthRepository>
        });
        let store = TokenStore::from_config(&config);

        Ok(Self {
            proxy: Arc::new(ProxyHandler::from_config(&config, client, auth.clone())),
            login: Arc::new(LoginHandler::new(auth.clone(), store.clone())),
            logout: Arc::new(LogoutHandler::new(auth, store)),
            config,
        })
    }
}

pub fn create_router(config: AppConfig) -> Result<Router> {
    let state = AppState::from_config(config)?;
    Ok(router(state))
}

/// Build the router around already-wired handlers.
pub fn router(state: AppState) -> Router {
    let prefix = state.config.proxy.route_prefix.trim_end_matches('/').to_string();
    let max_body_bytes = state.config.proxy.max_body_bytes;

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route(&prefix, any(proxy_handler))
        .route(&format!("{}/*path", prefix), any(proxy_handler))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
