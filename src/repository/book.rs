// Book repository
// Author: kelexine (https://github.com/kelexine)

use super::Collection;
use crate::error::AppResult;
use crate::http::HttpClient;
use crate::mappers::{self, book};
use crate::models::wire::BookDto;
use crate::models::{Book, BookInput, BookQuery, BookUpdate, Page};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn list(&self, query: &BookQuery) -> AppResult<Page<Book>>;
    async fn get_by_id(&self, id: i64) -> AppResult<Book>;
    async fn create(&self, input: &BookInput) -> AppResult<Book>;
    async fn update(&self, id: i64, input: &BookUpdate) -> AppResult<Book>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()>;
}

pub struct HttpBookRepository {
    books: Collection,
}

impl HttpBookRepository {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            books: Collection::new(client, "/books"),
        }
    }
}

#[async_trait]
impl BookRepository for HttpBookRepository {
    async fn list(&self, query: &BookQuery) -> AppResult<Page<Book>> {
        let list = self.books.find::<BookDto, _>(query).await?;
        Ok(mappers::page_to_domain(list, book::to_domain))
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.books.get(id).await.map(book::to_domain)
    }

    async fn create(&self, input: &BookInput) -> AppResult<Book> {
        self.books.create(input).await.map(book::to_domain)
    }

    async fn update(&self, id: i64, input: &BookUpdate) -> AppResult<Book> {
        self.books.update(id, input).await.map(book::to_domain)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.books.delete(id).await
    }

    async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()> {
        self.books.bulk_delete(ids).await
    }
}
