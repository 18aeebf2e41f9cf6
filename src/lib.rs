// corpus-gateway - Authenticated API gateway for the corpus administration dashboard
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod mappers;
pub mod metrics;
pub mod models;
pub mod proxy;
pub mod repository;
pub mod server;
pub mod session;
pub mod usecase;
pub mod utils;
