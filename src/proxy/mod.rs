//! Authenticated reverse proxy.
//!
//! The browser never sees a bearer token: requests under the proxy prefix are
//! forwarded upstream with the access token taken from the session cookie.
//! When the upstream answers 401 and a refresh cookie is present, the token
//! pair is refreshed once and the original request is replayed once with the
//! new access token. The rotated pair goes back to the browser as cookies.
//!
//! Every request has a single wall-clock budget covering the first call, the
//! refresh and the retry. Running out of it aborts the call in flight and
//! yields a 504.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod refresh;
pub mod request;
pub mod response;

pub use refresh::{RefreshCoordinator, Refreshed};
pub use request::{outbound_headers, target_url, ProxyMethod, ProxyRequest, EXCLUDED_HEADERS};
pub use response::{internal_error_response, timeout_response, UpstreamResponse};

use crate::config::AppConfig;
use crate::error::GatewayError;
use crate::metrics::{self, RefreshOutcome};
use crate::repository::AuthRepository;
use crate::session::TokenStore;
use crate::utils::logging::sanitize;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{timeout_at, Instant};
use tracing::{error, info, warn};

/// Where proxied calls go and how tokens are refreshed there.
pub struct Upstream {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub auth: Arc<dyn AuthRepository>,
}

impl Upstream {
    pub fn new(base_url: impl Into<String>, auth: Arc<dyn AuthRepository>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        }
    }
}

#[derive(Debug, Error)]
enum ForwardError {
    #[error("upstream did not answer before the request deadline")]
    Timeout,

    #[error("upstream transport error: {0}")]
    Transport(reqwest::Error),
}

pub struct ProxyHandler {
    client: Client,
    upstream: Option<Upstream>,
    store: TokenStore,
    refresher: RefreshCoordinator,
    timeout: Duration,
    sanitize_logs: bool,
}

impl ProxyHandler {
    /// `upstream` is `None` when no base URL is configured; every request then
    /// gets the configuration error.
    pub fn new(
        client: Client,
        upstream: Option<Upstream>,
        store: TokenStore,
        refresher: RefreshCoordinator,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            upstream,
            store,
            refresher,
            timeout,
            sanitize_logs: true,
        }
    }

    /// `auth` is the repository used for refreshes; the upstream counts as
    /// configured only when both it and a base URL are present.
    pub fn from_config(config: &AppConfig, client: Client, auth: Option<Arc<dyn AuthRepository>>) -> Self {
        let upstream = config
            .upstream_base()
            .zip(auth)
            .map(|(base, auth)| Upstream::new(base, auth));

        Self::new(
            client,
            upstream,
            TokenStore::from_config(config),
            RefreshCoordinator::new(
                config.proxy.single_flight_refresh,
                Duration::from_secs(config.proxy.refresh_grace_seconds),
            ),
            config.upstream.timeout(),
        )
        .with_log_sanitizing(config.logging.sanitize_tokens)
    }

    pub fn with_log_sanitizing(mut self, enabled: bool) -> Self {
        self.sanitize_logs = enabled;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.upstream.is_some()
    }

    /// When a request that arrived at `started` runs out of time.
    pub fn deadline(&self, started: Instant) -> Instant {
        started + self.timeout
    }

    /// Forward one request, refreshing and replaying it once on a 401.
    ///
    /// `started` is when the request arrived; the time budget counts from
    /// there, so reading the inbound body spends it too. The returned jar
    /// carries the rotated cookies when a refresh succeeded.
    pub async fn handle(
        &self,
        jar: CookieJar,
        request: ProxyRequest,
        started: Instant,
    ) -> (CookieJar, Response) {
        let (jar, response) = self.run(jar, &request, self.deadline(started)).await;

        let status = response.status().as_u16();
        metrics::record_proxy_request(request.method.as_str(), status);

        let path = if self.sanitize_logs {
            sanitize(&request.path)
        } else {
            request.path.clone()
        };
        info!(
            "{} {} -> {} ({}ms)",
            request.method.as_str(),
            path,
            status,
            started.elapsed().as_millis()
        );

        (jar, response)
    }

    async fn run(&self, jar: CookieJar, request: &ProxyRequest, deadline: Instant) -> (CookieJar, Response) {
        let Some(upstream) = &self.upstream else {
            error!("Upstream base URL is not configured");
            return (jar, GatewayError::MissingUpstream.into_response());
        };

        let stored = self.store.read(&jar);

        let first = match self
            .forward(upstream, request, stored.access_token.as_deref(), deadline)
            .await
        {
            Ok(response) => response,
            Err(err) => return (jar, self.failure(err)),
        };

        if first.status != StatusCode::UNAUTHORIZED {
            return (jar, self.translate(first));
        }
        let Some(refresh_token) = stored.refresh_token.as_deref() else {
            return (jar, self.translate(first));
        };

        // A refresh cut short by the deadline is a timeout, whichever timer fired
        let tokens = match timeout_at(deadline, self.refresh(upstream, refresh_token)).await {
            Ok(Some(refreshed)) => refreshed.into_tokens(),
            Ok(None) if Instant::now() < deadline => return (jar, self.translate(first)),
            Ok(None) | Err(_) => return (jar, self.failure(ForwardError::Timeout)),
        };

        let jar = self.store.store(jar, &tokens);

        // The replay is final, whatever it returns
        let response = match self
            .forward(upstream, request, Some(tokens.access_token.as_str()), deadline)
            .await
        {
            Ok(response) => self.translate(response),
            Err(err) => self.failure(err),
        };

        (jar, response)
    }

    async fn forward(
        &self,
        upstream: &Upstream,
        request: &ProxyRequest,
        access_token: Option<&str>,
        deadline: Instant,
    ) -> Result<UpstreamResponse, ForwardError> {
        let url = target_url(&upstream.base_url, &request.path, request.query.as_deref());
        let carries_body = request.method.carries_body();

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .headers(outbound_headers(&request.headers, access_token, carries_body));
        if carries_body {
            builder = builder.body(request.body.clone());
        }

        let call = async {
            let response = builder.send().await?;
            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().await?;

            Ok::<_, reqwest::Error>(UpstreamResponse {
                status,
                content_type,
                body,
            })
        };

        let started = Instant::now();
        let result = timeout_at(deadline, call).await;
        metrics::record_upstream_call(request.method.as_str(), started.elapsed().as_secs_f64());

        match result {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) if err.is_timeout() => Err(ForwardError::Timeout),
            Ok(Err(err)) => Err(ForwardError::Transport(err)),
            Err(_) => Err(ForwardError::Timeout),
        }
    }

    async fn refresh(&self, upstream: &Upstream, refresh_token: &str) -> Option<Refreshed> {
        let auth = &upstream.auth;
        let refreshed = self
            .refresher
            .refresh(refresh_token, || async move {
                match auth.refresh_token(refresh_token).await {
                    Ok(tokens) => Some(tokens),
                    Err(err) => {
                        warn!("Token refresh failed, returning the original 401: {}", err);
                        None
                    }
                }
            })
            .await;

        match &refreshed {
            Some(Refreshed::Fresh(_)) => {
                metrics::record_refresh(RefreshOutcome::Success);
                info!("Access token refreshed");
            }
            Some(Refreshed::Shared(_)) => metrics::record_refresh(RefreshOutcome::Shared),
            None => metrics::record_refresh(RefreshOutcome::Failure),
        }

        refreshed
    }

    fn translate(&self, response: UpstreamResponse) -> Response {
        response.into_browser_response().unwrap_or_else(|err| {
            error!("Upstream sent an unreadable JSON body: {}", err);
            internal_error_response()
        })
    }

    fn failure(&self, err: ForwardError) -> Response {
        match err {
            ForwardError::Timeout => {
                metrics::record_proxy_timeout();
                warn!("Upstream request timed out");
                timeout_response()
            }
            ForwardError::Transport(err) => {
                error!("Upstream request failed: {}", err);
                internal_error_response()
            }
        }
    }
}
