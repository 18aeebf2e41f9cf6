//! Axum-based HTTP server for the corpus gateway.
//!
//! The dashboard talks only to this server. It proxies API calls upstream
//! with the session's bearer token, and owns the login and logout routes
//! that write and clear the session cookies.
//!
//! # Components
//!
//! - `handlers`: Endpoint implementations (proxy, login, logout, health, metrics).
//! - `middleware`: Request ID tracking layers.
//! - `routes`: Shared state and the router that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthCheck, HealthResponse, HealthStatus};
pub use routes::{create_router, router, AppState};
