// Outbound request construction
// Author: kelexine (https://github.com/kelexine)

use crate::error::GatewayError;
use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, AUTHORIZATION, CONNECTION, CONTENT_LENGTH,
    CONTENT_TYPE, HOST, TRANSFER_ENCODING,
};
use axum::http::Method;
use bytes::Bytes;
use tracing::warn;

/// Inbound headers that are never forwarded as received.
pub const EXCLUDED_HEADERS: [HeaderName; 5] =
    [HOST, CONNECTION, AUTHORIZATION, CONTENT_LENGTH, TRANSFER_ENCODING];

/// Methods the proxy forwards. Anything else is rejected with 405.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl ProxyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyMethod::Get => "GET",
            ProxyMethod::Post => "POST",
            ProxyMethod::Put => "PUT",
            ProxyMethod::Delete => "DELETE",
            ProxyMethod::Patch => "PATCH",
        }
    }

    /// POST, PUT and PATCH forward the inbound body.
    pub fn carries_body(&self) -> bool {
        matches!(self, ProxyMethod::Post | ProxyMethod::Put | ProxyMethod::Patch)
    }
}

impl TryFrom<&Method> for ProxyMethod {
    type Error = GatewayError;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        match method.as_str() {
            "GET" => Ok(ProxyMethod::Get),
            "POST" => Ok(ProxyMethod::Post),
            "PUT" => Ok(ProxyMethod::Put),
            "DELETE" => Ok(ProxyMethod::Delete),
            "PATCH" => Ok(ProxyMethod::Patch),
            other => Err(GatewayError::MethodNotAllowed(other.to_string())),
        }
    }
}

impl From<ProxyMethod> for Method {
    fn from(method: ProxyMethod) -> Self {
        match method {
            ProxyMethod::Get => Method::GET,
            ProxyMethod::Post => Method::POST,
            ProxyMethod::Put => Method::PUT,
            ProxyMethod::Delete => Method::DELETE,
            ProxyMethod::Patch => Method::PATCH,
        }
    }
}

/// One inbound call to the proxy route.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: ProxyMethod,
    /// Path after the route prefix, still percent-encoded.
    pub path: String,
    /// Raw query string; `Some("")` when the URI ended in a bare `?`.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// `{base}{path}` plus `?{query}` when the inbound URI had a query component.
pub fn target_url(base: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) => format!("{}{}?{}", base, path, query),
        None => format!("{}{}", base, path),
    }
}

/// Headers for an upstream call: inbound headers minus the excluded set, then
/// the proxy's own bearer header.
pub fn outbound_headers(inbound: &HeaderMap, access_token: Option<&str>, carries_body: bool) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len() + 1);
    for (name, value) in inbound.iter() {
        // Bodies are re-emitted decoded, so the gateway's client negotiates encoding itself
        if EXCLUDED_HEADERS.contains(name) || name == ACCEPT_ENCODING {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    if let Some(token) = access_token {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("Access token cookie is not a valid header value, forwarding without it"),
        }
    }

    if carries_body && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    headers
}
