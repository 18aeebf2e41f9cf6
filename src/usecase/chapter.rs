// Chapter use cases
// Author: kelexine (https://github.com/kelexine)

use super::require_ids;
use crate::error::AppResult;
use crate::models::{Chapter, ChapterInput, ChapterQuery, ChapterUpdate, Page};
use crate::repository::ChapterRepository;
use std::sync::Arc;

pub struct ChapterUseCases {
    chapters: Arc<dyn ChapterRepository>,
}

impl ChapterUseCases {
    pub fn new(chapters: Arc<dyn ChapterRepository>) -> Self {
        Self { chapters }
    }

    pub async fn find(&self, query: &ChapterQuery) -> AppResult<Page<Chapter>> {
        self.chapters.find(query).await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Chapter> {
        self.chapters.get_by_id(id).await
    }

    pub async fn create(&self, input: &ChapterInput) -> AppResult<Chapter> {
        self.chapters.create(input).await
    }

    pub async fn update(&self, id: i64, input: &ChapterUpdate) -> AppResult<Chapter> {
        self.chapters.update(id, input).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.chapters.delete(id).await
    }

    pub async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()> {
        require_ids(ids)?;
        self.chapters.bulk_delete(ids).await
    }
}
