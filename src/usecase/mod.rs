//! Use cases: validate input, call the repository, hand the result back.

// Author: kelexine (https://github.com/kelexine)

mod auth;
mod book;
mod chapter;
mod translation;
mod verse;

pub use auth::LoginUseCase;
pub use book::BookUseCases;
pub use chapter::ChapterUseCases;
pub use translation::TranslationUseCases;
pub use verse::VerseUseCases;

use crate::error::{AppError, AppResult, FieldErrors};

/// A validation failure pinned to one input field.
pub(crate) fn invalid(field: &str, message: &str) -> AppError {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![message.to_string()]);
    AppError::validation(message, Some(errors))
}

pub(crate) fn require_ids(ids: &[i64]) -> AppResult<()> {
    if ids.is_empty() {
        return Err(invalid("ids", "Select at least one item to delete"));
    }
    Ok(())
}
