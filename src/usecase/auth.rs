// Login use case
// Author: kelexine (https://github.com/kelexine)

use super::invalid;
use crate::error::AppResult;
use crate::models::{AuthSession, LoginCredentials};
use crate::repository::AuthRepository;
use std::sync::Arc;

pub struct LoginUseCase {
    auth: Arc<dyn AuthRepository>,
}

impl LoginUseCase {
    pub fn new(auth: Arc<dyn AuthRepository>) -> Self {
        Self { auth }
    }

    /// Validate the form, then log in upstream. Storing the tokens is up to the caller.
    pub async fn execute(&self, credentials: &LoginCredentials) -> AppResult<AuthSession> {
        if credentials.username_or_email.trim().is_empty() {
            return Err(invalid("username_or_email", "Username or email is required"));
        }
        if credentials.password.is_empty() {
            return Err(invalid("password", "Password is required"));
        }

        self.auth.login(credentials).await
    }
}
