//! Configuration data structures for the corpus gateway.
//!
//! This module defines the schema for the application settings: the listening
//! server, the upstream API, proxy behaviour, session cookies and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment. `production` turns on `Secure` cookies.
    /// Default: `development`
    #[serde(default = "default_environment")]
    pub environment: String,

    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream API connection settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Proxy route behaviour.
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Session cookie settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `3000`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the upstream REST API that owns the corpus data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL every proxied path is appended to, e.g. `https://api.example.com/v1`.
    /// No default: when absent the proxy answers with a configuration error.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Wall-clock budget for one proxied request, refresh and retry included.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// TCP connect timeout for upstream connections.
    /// Default: `10`
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

/// Settings for the `/api/proxy` forwarder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Route prefix stripped from inbound paths before forwarding.
    /// Default: `/api/proxy`
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Largest request body accepted for forwarding, in bytes.
    /// Default: `10 MiB`
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Coalesce concurrent refreshes that carry the same refresh token.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub single_flight_refresh: bool,

    /// How long a successful refresh result is handed to late siblings.
    /// Default: `10`
    #[serde(default = "default_refresh_grace")]
    pub refresh_grace_seconds: u64,
}

/// Settings for the HTTP-only session cookies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of the `access_token` cookie.
    /// Default: `7`
    #[serde(default = "default_access_days")]
    pub access_token_days: i64,

    /// Lifetime of the `refresh_token` cookie.
    /// Default: `30`
    #[serde(default = "default_refresh_days")]
    pub refresh_token_days: i64,

    /// Cookie path attribute.
    /// Default: `/`
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,

    /// Force the `Secure` attribute on or off. Unset follows `environment`.
    #[serde(default)]
    pub secure: Option<bool>,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask tokens and credentials in logs.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub sanitize_tokens: bool,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.session.secure.unwrap_or_else(|| self.is_production())
    }

    /// Configured upstream base with any trailing `/` removed.
    pub fn upstream_base(&self) -> Option<&str> {
        self.upstream
            .base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

// Default trait implementations linking to custom logic

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            proxy: ProxyConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            route_prefix: default_route_prefix(),
            max_body_bytes: default_max_body_bytes(),
            single_flight_refresh: true,
            refresh_grace_seconds: default_refresh_grace(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_token_days: default_access_days(),
            refresh_token_days: default_refresh_days(),
            cookie_path: default_cookie_path(),
            secure: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            sanitize_tokens: true,
        }
    }
}

// Helper functions for serde defaults
fn default_environment() -> String {
    "development".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_route_prefix() -> String {
    "/api/proxy".to_string()
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

fn default_refresh_grace() -> u64 {
    10
}

fn default_access_days() -> i64 {
    7
}

fn default_refresh_days() -> i64 {
    30
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
