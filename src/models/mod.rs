//! Data models for the corpus API.
//!
//! This module contains:
//! - Domain entities handed to callers (`entities`)
//! - The upstream's wire format, including loose number handling (`wire`)
//! - Paginated list results (`pagination`)
//! - List criteria and create/update payloads (`requests`)

// Author: kelexine (https://github.com/kelexine)

pub mod entities;
pub mod pagination;
pub mod requests;
pub mod wire;

pub use entities::{
    AuthSession, Book, Chapter, TokenPair, Translation, User, Verse, VerseSummary,
};
pub use pagination::{Page, PaginationMeta};
pub use requests::{
    query_string, with_query, BookInput, BookQuery, BookUpdate, ChapterInput, ChapterQuery,
    ChapterUpdate, LoginCredentials, TranslationInput, TranslationQuery, TranslationUpdate,
    VerseInput, VerseQuery, VerseUpdate,
};
