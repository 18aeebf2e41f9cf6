//! Repository ports and their HTTP-backed implementations.
//!
//! Each entity gets a narrow trait plus an implementation over [`HttpClient`].
//! Failures from the client pass through unchanged; a 2xx body that does not
//! match the expected schema becomes `ServerError("Unexpected response format")`.

// Author: kelexine (https://github.com/kelexine)

mod auth;
mod book;
mod chapter;
mod translation;
mod verse;

pub use auth::{AuthRepository, HttpAuthRepository};
pub use book::{BookRepository, HttpBookRepository};
pub use chapter::{ChapterRepository, HttpChapterRepository};
pub use translation::{HttpTranslationRepository, TranslationRepository};
pub use verse::{HttpVerseRepository, VerseRepository};

use crate::error::{AppError, AppResult};
use crate::http::{HttpClient, HttpResponse, RequestOptions};
use crate::models::wire::{ListDto, Payload};
use crate::models::with_query;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Decode a 2xx body that may or may not be wrapped in the `{status, data}` envelope.
pub(crate) fn decode<D: DeserializeOwned>(response: HttpResponse) -> AppResult<D> {
    Payload::<D>::parse(response.data).map_err(|e| {
        debug!("Response did not match the expected schema: {}", e);
        AppError::unexpected_format().with_source(e)
    })
}

pub(crate) fn encode<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::unknown("Failed to encode request body", 0).with_source(e))
}

/// CRUD calls shared by every entity collection (`/books`, `/chapters`, ...).
#[derive(Clone)]
pub(crate) struct Collection {
    client: Arc<dyn HttpClient>,
    path: &'static str,
}

impl Collection {
    pub(crate) fn new(client: Arc<dyn HttpClient>, path: &'static str) -> Self {
        Self { client, path }
    }

    fn item(&self, id: i64) -> String {
        format!("{}/{}", self.path, id)
    }

    pub(crate) async fn find<D, Q>(&self, criteria: &Q) -> AppResult<ListDto<D>>
    where
        D: DeserializeOwned,
        Q: Serialize + Sync,
    {
        let url = with_query(self.path, criteria);
        let response = self.client.get(&url, RequestOptions::new()).await?;
        decode(response)
    }

    pub(crate) async fn get<D: DeserializeOwned>(&self, id: i64) -> AppResult<D> {
        let response = self.client.get(&self.item(id), RequestOptions::new()).await?;
        decode(response)
    }

    pub(crate) async fn create<D, B>(&self, input: &B) -> AppResult<D>
    where
        D: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .client
            .post(self.path, encode(input)?, RequestOptions::new())
            .await?;
        decode(response)
    }

    pub(crate) async fn update<D, B>(&self, id: i64, input: &B) -> AppResult<D>
    where
        D: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .client
            .put(&self.item(id), encode(input)?, RequestOptions::new())
            .await?;
        decode(response)
    }

    pub(crate) async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&self.item(id), RequestOptions::new()).await?;
        Ok(())
    }

    /// Any 2xx counts as done, including ids that were already gone.
    pub(crate) async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()> {
        let url = format!("{}/bulk-delete", self.path);
        self.client
            .post(&url, json!({ "ids": ids }), RequestOptions::new())
            .await?;
        Ok(())
    }
}
