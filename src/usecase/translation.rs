// Translation use cases
// Author: kelexine (https://github.com/kelexine)

use super::require_ids;
use crate::error::AppResult;
use crate::models::{Page, Translation, TranslationInput, TranslationQuery, TranslationUpdate};
use crate::repository::TranslationRepository;
use std::sync::Arc;

pub struct TranslationUseCases {
    translations: Arc<dyn TranslationRepository>,
}

impl TranslationUseCases {
    pub fn new(translations: Arc<dyn TranslationRepository>) -> Self {
        Self { translations }
    }

    pub async fn find(&self, query: &TranslationQuery) -> AppResult<Page<Translation>> {
        self.translations.find(query).await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Translation> {
        self.translations.get_by_id(id).await
    }

    pub async fn create(&self, input: &TranslationInput) -> AppResult<Translation> {
        self.translations.create(input).await
    }

    pub async fn update(&self, id: i64, input: &TranslationUpdate) -> AppResult<Translation> {
        self.translations.update(id, input).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.translations.delete(id).await
    }

    pub async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()> {
        require_ids(ids)?;
        self.translations.bulk_delete(ids).await
    }
}
