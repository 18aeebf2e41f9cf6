// Cookie-backed token store
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use crate::models::TokenPair;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};
use zeroize::Zeroize;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Tokens found on an inbound request. Either may be missing.
#[derive(Clone, Default, Zeroize)]
#[zeroize(drop)]
pub struct StoredTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

// Custom Debug impl that never logs tokens
impl std::fmt::Debug for StoredTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredTokens")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Reads and writes the session cookies.
#[derive(Debug, Clone)]
pub struct TokenStore {
    access_ttl: Duration,
    refresh_ttl: Duration,
    path: String,
    secure: bool,
}

impl TokenStore {
    pub fn new(access_ttl: Duration, refresh_ttl: Duration, path: impl Into<String>, secure: bool) -> Self {
        Self {
            access_ttl,
            refresh_ttl,
            path: path.into(),
            secure,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Duration::days(config.session.access_token_days),
            Duration::days(config.session.refresh_token_days),
            config.session.cookie_path.clone(),
            config.secure_cookies(),
        )
    }

    /// Empty cookie values count as absent.
    pub fn read(&self, jar: &CookieJar) -> StoredTokens {
        let value = |name: &str| {
            jar.get(name)
                .map(|cookie| cookie.value().to_string())
                .filter(|value| !value.is_empty())
        };

        StoredTokens {
            access_token: value(ACCESS_TOKEN_COOKIE),
            refresh_token: value(REFRESH_TOKEN_COOKIE),
        }
    }

    /// Write both cookies.
    pub fn store(&self, jar: CookieJar, tokens: &TokenPair) -> CookieJar {
        let now = OffsetDateTime::now_utc();
        jar.add(self.cookie(ACCESS_TOKEN_COOKIE, tokens.access_token.clone(), self.access_ttl, now))
            .add(self.cookie(REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone(), self.refresh_ttl, now))
    }

    /// Expire both cookies, whether or not the request carried them.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.expired(ACCESS_TOKEN_COOKIE))
            .add(self.expired(REFRESH_TOKEN_COOKIE))
    }

    fn cookie(&self, name: &'static str, value: String, ttl: Duration, now: OffsetDateTime) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .path(self.path.clone())
            .max_age(ttl)
            .expires(now + ttl)
            .build()
    }

    fn expired(&self, name: &'static str) -> Cookie<'static> {
        Cookie::build((name, ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .path(self.path.clone())
            .max_age(Duration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use axum::response::IntoResponse;

    fn store() -> TokenStore {
        TokenStore::new(Duration::days(7), Duration::days(30), "/", true)
    }

    fn set_cookies(jar: CookieJar) -> Vec<String> {
        jar.into_response()
            .headers()
            .get_all(axum::http::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_store_writes_both_cookies() {
        let jar = store().store(CookieJar::new(), &TokenPair::new("at-1", "rt-1"));
        let cookies = set_cookies(jar);

        assert_eq!(cookies.len(), 2);
        let access = cookies.iter().find(|c| c.starts_with("access_token=at-1")).unwrap();
        let refresh = cookies.iter().find(|c| c.starts_with("refresh_token=rt-1")).unwrap();
        for cookie in [access, refresh] {
            assert!(cookie.contains("HttpOnly"));
            assert!(cookie.contains("SameSite=Lax"));
            assert!(cookie.contains("Secure"));
            assert!(cookie.contains("Path=/"));
        }
        assert!(access.contains("Max-Age=604800"));
        assert!(refresh.contains("Max-Age=2592000"));
    }

    #[test]
    fn test_clear_expires_both_even_when_absent() {
        let cookies = set_cookies(store().clear(CookieJar::new()));

        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().any(|c| c.starts_with("access_token=;")));
        assert!(cookies.iter().any(|c| c.starts_with("refresh_token=;")));
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }

    #[test]
    fn test_read_ignores_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            "access_token=; refresh_token=rt-9".parse().unwrap(),
        );
        let jar = CookieJar::from_headers(&headers);
        let tokens = store().read(&jar);

        assert!(tokens.access_token.is_none());
        assert_eq!(tokens.refresh_token.as_deref(), Some("rt-9"));
    }
}
