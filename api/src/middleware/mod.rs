//! HTTP middleware: authentication, CORS, security headers, rate limiting

pub mod auth;
pub mod cors;
pub mod rate_limit;
pub mod security;

pub use auth::{AuthContext, AuthGuard};
pub use cors::create_cors;
pub use rate_limit::ApiRateLimit;
pub use security::SecurityHeaders;
