// Domain entities
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Result of a successful login. Tokens are wiped on drop and never printed.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct AuthSession {
    #[zeroize(skip)]
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<String>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user.username)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// The access/refresh pair kept in the session cookies. Always handled as a unit.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

impl AuthSession {
    pub fn tokens(&self) -> TokenPair {
        TokenPair::new(self.access_token.clone(), self.refresh_token.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub published_year: Option<i32>,
    pub cover_image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: i64,
    pub book_id: i64,
    pub chapter_number: i64,
    pub title: String,
    pub category: String,
    pub description: String,
    pub total_verses: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    pub id: i64,
    pub chapter_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<Chapter>,
    pub verse_number: i64,
    pub arabic_text: String,
    pub transliteration: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// The slice of a verse embedded in a translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseSummary {
    pub id: i64,
    pub arabic_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: i64,
    pub verse_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse: Option<VerseSummary>,
    pub language_code: String,
    pub translation: String,
    pub translator: String,
    pub created_at: String,
    pub updated_at: String,
}
