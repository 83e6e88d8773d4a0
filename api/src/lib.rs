//! Teamspace HTTP API
//!
//! Actix-web surface over the core services: workspace resolution and
//! registration, login with dual credentials (JWT + session cookie), the
//! one-time code flows, and the public workspace bootstrap endpoint.
//! Responses use a uniform envelope with localized messages.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::AppState;
