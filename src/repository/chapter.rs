// Chapter repository
// Author: kelexine (https://github.com/kelexine)

use super::Collection;
use crate::error::AppResult;
use crate::http::HttpClient;
use crate::mappers::{self, chapter};
use crate::models::wire::ChapterDto;
use crate::models::{Chapter, ChapterInput, ChapterQuery, ChapterUpdate, Page};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ChapterRepository: Send + Sync {
    async fn find(&self, query: &ChapterQuery) -> AppResult<Page<Chapter>>;
    async fn get_by_id(&self, id: i64) -> AppResult<Chapter>;
    async fn create(&self, input: &ChapterInput) -> AppResult<Chapter>;
    async fn update(&self, id: i64, input: &ChapterUpdate) -> AppResult<Chapter>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()>;
}

pub struct HttpChapterRepository {
    chapters: Collection,
}

impl HttpChapterRepository {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            chapters: Collection::new(client, "/chapters"),
        }
    }
}

#[async_trait]
impl ChapterRepository for HttpChapterRepository {
    async fn find(&self, query: &ChapterQuery) -> AppResult<Page<Chapter>> {
        let list = self.chapters.find::<ChapterDto, _>(query).await?;
        Ok(mappers::page_to_domain(list, chapter::to_domain))
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Chapter> {
        self.chapters.get(id).await.map(chapter::to_domain)
    }

    async fn create(&self, input: &ChapterInput) -> AppResult<Chapter> {
        self.chapters.create(input).await.map(chapter::to_domain)
    }

    async fn update(&self, id: i64, input: &ChapterUpdate) -> AppResult<Chapter> {
        self.chapters.update(id, input).await.map(chapter::to_domain)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.chapters.delete(id).await
    }

    async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()> {
        self.chapters.bulk_delete(ids).await
    }
}
