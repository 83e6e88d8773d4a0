//! # Teamspace Infrastructure
//!
//! Infrastructure layer for the Teamspace backend. Implements the core
//! crate's repository and service traits against MySQL (sqlx), Redis
//! (sessions and rate limiting), and an HTTP mail API (reqwest).

pub mod cache;
pub mod database;
pub mod mail;

use thiserror::Error;

/// Errors raised while constructing or operating infrastructure components
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Mail API error: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub use cache::{RedisClient, RedisRateLimiter, RedisSessionStore};
pub use database::mysql::{
    MySqlCodeRepository, MySqlEmailLogRepository, MySqlUserRepository, MySqlWorkspaceRepository,
};
pub use database::DatabasePool;
pub use mail::{HttpMailer, MockMailer};
