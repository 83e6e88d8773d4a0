//! JWT token management service

mod config;
mod service;

pub use config::TokenServiceConfig;
pub use service::TokenService;
