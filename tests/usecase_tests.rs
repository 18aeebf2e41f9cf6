// Use case validation tests
// Author: kelexine (https://github.com/kelexine)

use async_trait::async_trait;
use corpus_gateway::error::{AppError, AppResult, ErrorCode};
use corpus_gateway::models::{
    AuthSession, Book, BookInput, BookQuery, BookUpdate, LoginCredentials, Page, PaginationMeta,
    TokenPair, User, Verse, VerseInput, VerseQuery, VerseUpdate,
};
use corpus_gateway::repository::{AuthRepository, BookRepository, VerseRepository};
use corpus_gateway::usecase::{BookUseCases, LoginUseCase, VerseUseCases};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

fn book(id: i64, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: None,
        description: None,
        published_year: None,
        cover_image_url: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

/// In-memory book store that records what reached it.
#[derive(Default)]
struct FakeBooks {
    calls: AtomicUsize,
    deleted: Mutex<Vec<i64>>,
}

#[async_trait]
impl BookRepository for FakeBooks {
    async fn list(&self, _query: &BookQuery) -> AppResult<Page<Book>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Page {
            data: vec![book(3, "C"), book(1, "A"), book(2, "B")],
            meta: PaginationMeta {
                total: 3,
                total_pages: 1,
                page: 1,
                limit: 10,
                count: 3,
            },
        })
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::not_found(format!("Book {} not found", id)))
    }

    async fn create(&self, input: &BookInput) -> AppResult<Book> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(book(10, &input.title))
    }

    async fn update(&self, id: i64, input: &BookUpdate) -> AppResult<Book> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(book(id, input.title.as_deref().unwrap_or("unchanged")))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.deleted.lock().push(id);
        Ok(())
    }

    async fn bulk_delete(&self, ids: &[i64]) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.deleted.lock().extend_from_slice(ids);
        Ok(())
    }
}

#[tokio::test]
async fn test_books_are_sorted_by_id() {
    let books = BookUseCases::new(Arc::new(FakeBooks::default()));

    let page = assert_ok!(books.get_all(&BookQuery::default()).await);
    let ids: Vec<i64> = page.data.iter().map(|b| b.id).collect();

    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(page.meta.total, 3);
}

#[tokio::test]
async fn test_blank_title_never_reaches_repository() {
    let repo = Arc::new(FakeBooks::default());
    let books = BookUseCases::new(repo.clone());

    let input = BookInput {
        title: "   ".to_string(),
        ..BookInput::default()
    };
    let err = assert_err!(books.create(&input).await);

    assert!(err.is(ErrorCode::Validation));
    assert!(err.errors.as_ref().unwrap().contains_key("title"));
    assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let repo = Arc::new(FakeBooks::default());
    let books = BookUseCases::new(repo.clone());

    let err = assert_err!(books.update(1, &BookUpdate::default()).await);
    assert!(err.is(ErrorCode::Validation));
    assert_eq!(repo.calls.load(Ordering::SeqCst), 0);

    let update = BookUpdate {
        title: Some("Al-Fatiha".to_string()),
        ..BookUpdate::default()
    };
    let updated = assert_ok!(books.update(1, &update).await);
    assert_eq!(updated.title, "Al-Fatiha");
}

#[tokio::test]
async fn test_bulk_delete_requires_ids() {
    let repo = Arc::new(FakeBooks::default());
    let books = BookUseCases::new(repo.clone());

    let err = assert_err!(books.bulk_delete(&[]).await);
    assert_eq!(err.message, "Select at least one item to delete");

    assert_ok!(books.bulk_delete(&[4, 5]).await);
    assert_eq!(*repo.deleted.lock(), vec![4, 5]);
}

#[tokio::test]
async fn test_repository_errors_pass_through() {
    let books = BookUseCases::new(Arc::new(FakeBooks::default()));

    let err = assert_err!(books.get_by_id(9).await);
    assert!(err.is(ErrorCode::NotFound));
    assert_eq!(err.user_message(), "Book 9 not found");
}

/// Verse store that fails every call with a server error.
struct BrokenVerses;

#[async_trait]
impl VerseRepository for BrokenVerses {
    async fn find(&self, _query: &VerseQuery) -> AppResult<Page<Verse>> {
        Err(AppError::unexpected_format())
    }
    async fn get_by_id(&self, _id: i64) -> AppResult<Verse> {
        Err(AppError::unexpected_format())
    }
    async fn create(&self, _input: &VerseInput) -> AppResult<Verse> {
        Err(AppError::unexpected_format())
    }
    async fn update(&self, _id: i64, _input: &VerseUpdate) -> AppResult<Verse> {
        Err(AppError::unexpected_format())
    }
    async fn delete(&self, _id: i64) -> AppResult<()> {
        Err(AppError::unexpected_format())
    }
    async fn bulk_delete(&self, _ids: &[i64]) -> AppResult<()> {
        Err(AppError::unexpected_format())
    }
}

#[tokio::test]
async fn test_verse_use_cases_validate_then_delegate() {
    let verses = VerseUseCases::new(Arc::new(BrokenVerses));

    let err = assert_err!(verses.bulk_delete(&[]).await);
    assert!(err.is(ErrorCode::Validation));

    let err = assert_err!(verses.find(&VerseQuery::default()).await);
    assert_eq!(err.message, "Unexpected response format");
}

/// Auth store that accepts exactly one password.
struct FakeAuth {
    logins: AtomicUsize,
}

#[async_trait]
impl AuthRepository for FakeAuth {
    async fn login(&self, credentials: &LoginCredentials) -> AppResult<AuthSession> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        if credentials.password != "correct horse" {
            return Err(AppError::unauthorized("Invalid credentials"));
        }
        Ok(AuthSession {
            user: User {
                id: 1,
                username: credentials.username_or_email.clone(),
                email: "admin@example.com".to_string(),
                is_active: true,
                last_login_at: None,
                created_at: String::new(),
                updated_at: String::new(),
            },
            access_token: "at-1".to_string(),
            refresh_token: "rt-1".to_string(),
            expires_at: None,
        })
    }

    async fn refresh_token(&self, _refresh_token: &str) -> AppResult<TokenPair> {
        Ok(TokenPair::new("at-2", "rt-2"))
    }

    async fn logout(&self, _access_token: &str, _refresh_token: Option<&str>) -> AppResult<()> {
        Ok(())
    }
}

fn credentials(username: &str, password: &str) -> LoginCredentials {
    LoginCredentials {
        username_or_email: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_validation() {
    let auth = Arc::new(FakeAuth {
        logins: AtomicUsize::new(0),
    });
    let login = LoginUseCase::new(auth.clone());

    let err = assert_err!(login.execute(&credentials("", "correct horse")).await);
    assert_eq!(err.message, "Username or email is required");

    let err = assert_err!(login.execute(&credentials("admin", "")).await);
    assert_eq!(err.message, "Password is required");
    assert_eq!(auth.logins.load(Ordering::SeqCst), 0);

    let err = assert_err!(login.execute(&credentials("admin", "wrong")).await);
    assert!(err.is(ErrorCode::Unauthorized));

    let session = assert_ok!(login.execute(&credentials("admin", "correct horse")).await);
    assert_eq!(session.user.username, "admin");
    assert_eq!(session.tokens(), TokenPair::new("at-1", "rt-1"));
    assert_eq!(auth.logins.load(Ordering::SeqCst), 2);
}
