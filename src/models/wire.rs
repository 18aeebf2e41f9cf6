// Upstream wire format (snake_case, loosely typed)
// Author: kelexine (https://github.com/kelexine)

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// `{status, message, data}` wrapper some endpoints put around their payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// A single-entity response: either wrapped in [`ApiEnvelope`] or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Wrapped(ApiEnvelope<T>),
    Bare(T),
}

impl<T> Payload<T> {
    pub fn into_inner(self) -> T {
        match self {
            Payload::Wrapped(envelope) => envelope.data,
            Payload::Bare(inner) => inner,
        }
    }
}

impl<T: DeserializeOwned> Payload<T> {
    /// Parse a response body, failing closed on schema mismatch.
    pub fn parse(value: serde_json::Value) -> Result<T, serde_json::Error> {
        serde_json::from_value::<Payload<T>>(value).map(Payload::into_inner)
    }
}

/// Numbers arrive as JSON numbers or numeric strings depending on the endpoint.
pub(crate) mod flex {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Int(i64),
        Float(f64),
        Text(String),
    }

    impl NumberOrString {
        fn to_i64(&self) -> Option<i64> {
            match self {
                NumberOrString::Int(n) => Some(*n),
                NumberOrString::Float(f) if f.fract() == 0.0 => Some(*f as i64),
                NumberOrString::Float(_) => None,
                NumberOrString::Text(s) => s.trim().parse().ok(),
            }
        }
    }

    pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = NumberOrString::deserialize(deserializer)?;
        raw.to_i64()
            .ok_or_else(|| de::Error::custom("expected an integer or numeric string"))
    }

    /// Null, missing and blank strings all become `None`.
    pub fn opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(raw) => raw
                .to_i64()
                .map(Some)
                .ok_or_else(|| de::Error::custom("expected an integer or numeric string")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    #[serde(deserialize_with = "flex::int")]
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_login_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /auth/login`.
#[derive(Deserialize)]
pub struct LoginDto {
    pub user: UserDto,
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Body of `POST /auth/refresh`.
#[derive(Deserialize)]
pub struct RefreshDto {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookDto {
    #[serde(deserialize_with = "flex::int")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub published_year: Option<i64>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Chapters come back camelCase from list endpoints and snake_case from writes.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterDto {
    #[serde(deserialize_with = "flex::int")]
    pub id: i64,
    #[serde(alias = "bookId", deserialize_with = "flex::int")]
    pub book_id: i64,
    #[serde(alias = "chapterNumber", deserialize_with = "flex::int")]
    pub chapter_number: i64,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "totalVerses",
        alias = "total_verse",
        deserialize_with = "flex::opt_int"
    )]
    pub total_verses: Option<i64>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerseDto {
    #[serde(deserialize_with = "flex::int")]
    pub id: i64,
    #[serde(alias = "chapterId", deserialize_with = "flex::int")]
    pub chapter_id: i64,
    #[serde(default)]
    pub chapter: Option<ChapterDto>,
    #[serde(alias = "verseNumber", deserialize_with = "flex::int")]
    pub verse_number: i64,
    #[serde(alias = "arabicText")]
    pub arabic_text: String,
    #[serde(default, alias = "transliteration_text")]
    pub transliteration: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerseSummaryDto {
    #[serde(deserialize_with = "flex::int")]
    pub id: i64,
    #[serde(default)]
    pub arabic_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationDto {
    #[serde(deserialize_with = "flex::int")]
    pub id: i64,
    #[serde(deserialize_with = "flex::int")]
    pub verse_id: i64,
    #[serde(default)]
    pub verse: Option<VerseSummaryDto>,
    pub language_code: String,
    #[serde(alias = "translation")]
    pub translation_text: String,
    #[serde(default, alias = "translator")]
    pub translator_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// `meta` block of every paginated list.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaDto {
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub total: Option<i64>,
    #[serde(default, alias = "totalPages", deserialize_with = "flex::opt_int")]
    pub total_pages: Option<i64>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "flex::opt_int")]
    pub count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListDto<T> {
    pub data: Vec<T>,
    pub meta: MetaDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_accepts_bare_and_wrapped() {
        let bare = json!({"id": 3, "title": "Sahih"});
        let wrapped = json!({"status": "success", "message": "ok", "data": {"id": "3", "title": "Sahih"}});

        let a = Payload::<BookDto>::parse(bare).map(|b| b.id).ok();
        let b = Payload::<BookDto>::parse(wrapped).map(|b| b.id).ok();
        assert_eq!(a, Some(3));
        assert_eq!(b, Some(3));
    }

    #[test]
    fn test_payload_rejects_mismatched_shape() {
        assert!(Payload::<BookDto>::parse(json!({"status": "success", "data": []})).is_err());
        assert!(Payload::<BookDto>::parse(json!("plain text")).is_err());
    }

    #[test]
    fn test_flexible_numbers() {
        let book: BookDto = serde_json::from_value(json!({
            "id": 1, "title": "t", "published_year": "1998"
        }))
        .unwrap();
        assert_eq!(book.published_year, Some(1998));

        let book: BookDto = serde_json::from_value(json!({
            "id": 1, "title": "t", "published_year": ""
        }))
        .unwrap();
        assert_eq!(book.published_year, None);

        let bad = serde_json::from_value::<BookDto>(json!({"id": "abc", "title": "t"}));
        assert!(bad.is_err());
    }

    #[test]
    fn test_chapter_accepts_both_casings() {
        let camel: ChapterDto = serde_json::from_value(json!({
            "id": "4", "bookId": "2", "chapterNumber": 1, "title": "Al-Fatiha",
            "category": "meccan", "totalVerses": 7, "createdAt": "2024-01-01"
        }))
        .unwrap();
        let snake: ChapterDto = serde_json::from_value(json!({
            "id": 4, "book_id": 2, "chapter_number": "1", "title": "Al-Fatiha",
            "category": "meccan", "total_verse": "7", "created_at": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(camel.book_id, snake.book_id);
        assert_eq!(camel.total_verses, Some(7));
        assert_eq!(snake.total_verses, Some(7));
        assert_eq!(camel.created_at, snake.created_at);
    }
}
