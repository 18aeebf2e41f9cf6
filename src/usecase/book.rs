// Book use cases
// Author: kelexine (https://github.com/kelexine)

use super::{invalid, require_ids};
use crate::error::AppResult;
use crate::models::{Book, BookInput, BookQuery, BookUpdate, Page};
use crate::repository::BookRepository;
use std::sync::Arc;

pub struct BookUseCases {
    books: Arc<dyn BookRepository>,
}

impl BookUseCases {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    /// List books, ordered by id ascending.
    pub async fn get_all(&self, query: &BookQuery) -> AppResult<Page<Book>> {
        let mut page = self.books.list(query).await?;
        page.data.sort_by_key(|book| book.id);
        Ok(page)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.books.get_by_id(id).await
    }

    pub async fn create(&self, input: &BookInput) -> AppResult<Book> {
        if input.title.trim().is_empty() {
            return Err(invalid("title", "Book title must not be empty"));
        }
        self.books.create(input).await
    }

    pub async fn update(&self, id: i64, input: &BookUpdate) -> AppResult<Book> {
        if input.is_empty() {
            return Err(invalid("book", "There is nothing to update"));
        }
        self.books.update(id, input).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.books.delete(id).await
    }

    pub async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()> {
        require_ids(ids)?;
        self.books.bulk_delete(ids).await
    }
}
