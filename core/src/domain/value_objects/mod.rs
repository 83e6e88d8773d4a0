//! Value objects returned by business services

pub mod auth_response;

pub use auth_response::AuthResponse;
