//! Shared utilities and common types for the Teamspace server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - The API response envelope
//! - Utility functions (workspace URL and email validation)
//! - Common type definitions

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig, MailConfig,
    RateLimitConfig, ServerConfig, SessionConfig,
};
pub use types::{ApiEnvelope, Language};
pub use utils::validation;
