// List criteria and write payloads
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroize;

/// Render criteria as `k=v&...`, dropping null fields. Keys keep their serde names.
pub fn query_string<T: Serialize>(criteria: &T) -> String {
    let value = match serde_json::to_value(criteria) {
        Ok(Value::Object(map)) => map,
        _ => return String::new(),
    };

    value
        .iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&rendered)
            ))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Join a path and the rendered criteria.
pub fn with_query<T: Serialize>(path: &str, criteria: &T) -> String {
    let query = query_string(criteria);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterQuery {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub book_id: Option<i64>,
    #[serde(default)]
    pub chapter_id: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseQuery {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub chapter_id: Option<i64>,
    #[serde(default)]
    pub arabic_text: Option<String>,
    #[serde(default)]
    pub transliteration_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationQuery {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub verse_id: Option<i64>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub translator: Option<String>,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            page: first_page(),
            limit: None,
            search: None,
        }
    }
}

impl Default for ChapterQuery {
    fn default() -> Self {
        Self {
            page: first_page(),
            limit: None,
            search: None,
            book_id: None,
            chapter_id: None,
            category: None,
        }
    }
}

impl Default for VerseQuery {
    fn default() -> Self {
        Self {
            page: first_page(),
            limit: None,
            search: None,
            chapter_id: None,
            arabic_text: None,
            transliteration_text: None,
        }
    }
}

impl Default for TranslationQuery {
    fn default() -> Self {
        Self {
            page: first_page(),
            limit: None,
            search: None,
            verse_id: None,
            language_code: None,
            translator: None,
        }
    }
}

/// Login form as posted by the dashboard.
#[derive(Clone, Deserialize, Serialize, Zeroize)]
#[zeroize(drop)]
pub struct LoginCredentials {
    pub username_or_email: String,
    pub password: String,
}

// Custom Debug impl that never logs the password
impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username_or_email", &self.username_or_email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BookInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

/// Partial update; unset fields are left untouched upstream.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl BookUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.published_year.is_none()
            && self.cover_image_url.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChapterInput {
    pub book_id: i64,
    pub chapter_number: i64,
    pub title: String,
    pub category: String,
    pub description: String,
    pub total_verses: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChapterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_verses: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerseInput {
    pub chapter_id: i64,
    pub verse_number: i64,
    pub arabic_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arabic_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TranslationInput {
    pub verse_id: i64,
    pub language_code: String,
    #[serde(rename = "translation_text")]
    pub translation: String,
    #[serde(rename = "translator_name")]
    pub translator: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TranslationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(rename = "translation_text", skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(rename = "translator_name", skip_serializing_if = "Option::is_none")]
    pub translator: Option<String>,
}
