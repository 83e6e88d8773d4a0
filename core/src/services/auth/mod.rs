//! Authentication service: registration, login, sessions, code flows

mod config;
mod rate_limiter;
mod service;
mod session;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use rate_limiter::RateLimiterTrait;
pub use service::{AuthService, WorkspaceRegistration};
pub use session::{SessionData, SessionStoreTrait};
