// Auth mapping
// Author: kelexine (https://github.com/kelexine)

use crate::models::wire::{LoginDto, RefreshDto, UserDto};
use crate::models::{AuthSession, TokenPair, User};

pub fn user_to_domain(dto: UserDto) -> User {
    User {
        id: dto.id,
        username: dto.username,
        email: dto.email,
        is_active: dto.is_active,
        last_login_at: dto.last_login_at,
        created_at: dto.created_at.unwrap_or_default(),
        updated_at: dto.updated_at.unwrap_or_default(),
    }
}

pub fn session_to_domain(dto: LoginDto) -> AuthSession {
    AuthSession {
        user: user_to_domain(dto.user),
        access_token: dto.access_token,
        refresh_token: dto.refresh_token,
        expires_at: dto.expires_at,
    }
}

pub fn tokens_to_domain(dto: RefreshDto) -> TokenPair {
    TokenPair::new(dto.access_token, dto.refresh_token)
}
