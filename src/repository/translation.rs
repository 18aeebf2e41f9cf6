// Translation repository
// Author: kelexine (https://github.com/kelexine)

use super::Collection;
use crate::error::AppResult;
use crate::http::HttpClient;
use crate::mappers::{self, translation};
use crate::models::wire::TranslationDto;
use crate::models::{Page, Translation, TranslationInput, TranslationQuery, TranslationUpdate};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait TranslationRepository: Send + Sync {
    async fn find(&self, query: &TranslationQuery) -> AppResult<Page<Translation>>;
    async fn get_by_id(&self, id: i64) -> AppResult<Translation>;
    async fn create(&self, input: &TranslationInput) -> AppResult<Translation>;
    async fn update(&self, id: i64, input: &TranslationUpdate) -> AppResult<Translation>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()>;
}

pub struct HttpTranslationRepository {
    translations: Collection,
}

impl HttpTranslationRepository {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            translations: Collection::new(client, "/translations"),
        }
    }
}

#[async_trait]
impl TranslationRepository for HttpTranslationRepository {
    async fn find(&self, query: &TranslationQuery) -> AppResult<Page<Translation>> {
        let list = self.translations.find::<TranslationDto, _>(query).await?;
        Ok(mappers::page_to_domain(list, translation::to_domain))
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Translation> {
        self.translations.get(id).await.map(translation::to_domain)
    }

    async fn create(&self, input: &TranslationInput) -> AppResult<Translation> {
        self.translations.create(input).await.map(translation::to_domain)
    }

    async fn update(&self, id: i64, input: &TranslationUpdate) -> AppResult<Translation> {
        self.translations.update(id, input).await.map(translation::to_domain)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.translations.delete(id).await
    }

    async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()> {
        self.translations.bulk_delete(ids).await
    }
}
