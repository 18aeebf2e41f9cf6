// Verse repository
// Author: kelexine (https://github.com/kelexine)

use super::Collection;
use crate::error::AppResult;
use crate::http::HttpClient;
use crate::mappers::{self, verse};
use crate::models::wire::VerseDto;
use crate::models::{Page, Verse, VerseInput, VerseQuery, VerseUpdate};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait VerseRepository: Send + Sync {
    async fn find(&self, query: &VerseQuery) -> AppResult<Page<Verse>>;
    async fn get_by_id(&self, id: i64) -> AppResult<Verse>;
    async fn create(&self, input: &VerseInput) -> AppResult<Verse>;
    async fn update(&self, id: i64, input: &VerseUpdate) -> AppResult<Verse>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()>;
}

pub struct HttpVerseRepository {
    verses: Collection,
}

impl HttpVerseRepository {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            verses: Collection::new(client, "/verses"),
        }
    }
}

#[async_trait]
impl VerseRepository for HttpVerseRepository {
    async fn find(&self, query: &VerseQuery) -> AppResult<Page<Verse>> {
        let list = self.verses.find::<VerseDto, _>(query).await?;
        Ok(mappers::page_to_domain(list, verse::to_domain))
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Verse> {
        self.verses.get(id).await.map(verse::to_domain)
    }

    async fn create(&self, input: &VerseInput) -> AppResult<Verse> {
        self.verses.create(input).await.map(verse::to_domain)
    }

    async fn update(&self, id: i64, input: &VerseUpdate) -> AppResult<Verse> {
        self.verses.update(id, input).await.map(verse::to_domain)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.verses.delete(id).await
    }

    async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()> {
        self.verses.bulk_delete(ids).await
    }
}
