//! Session handling: the cookie-backed token store plus the login and logout flows.
//!
//! Tokens live only in HTTP-only cookies written by the gateway. Both cookies
//! are always written together and cleared together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod login;
mod logout;
mod store;

pub use crate::models::TokenPair;
pub use login::LoginHandler;
pub use logout::LogoutHandler;
pub use store::{StoredTokens, TokenStore, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
