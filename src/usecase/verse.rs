// Verse use cases
// Author: kelexine (https://github.com/kelexine)

use super::require_ids;
use crate::error::AppResult;
use crate::models::{Page, Verse, VerseInput, VerseQuery, VerseUpdate};
use crate::repository::VerseRepository;
use std::sync::Arc;

pub struct VerseUseCases {
    verses: Arc<dyn VerseRepository>,
}

impl VerseUseCases {
    pub fn new(verses: Arc<dyn VerseRepository>) -> Self {
        Self { verses }
    }

    pub async fn find(&self, query: &VerseQuery) -> AppResult<Page<Verse>> {
        self.verses.find(query).await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Verse> {
        self.verses.get_by_id(id).await
    }

    pub async fn create(&self, input: &VerseInput) -> AppResult<Verse> {
        self.verses.create(input).await
    }

    pub async fn update(&self, id: i64, input: &VerseUpdate) -> AppResult<Verse> {
        self.verses.update(id, input).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.verses.delete(id).await
    }

    pub async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()> {
        require_ids(ids)?;
        self.verses.bulk_delete(ids).await
    }
}
