//! Configuration for the authentication service

use ts_shared::config::rate_limit::LoginRateLimits;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Session lifetime in seconds
    pub session_ttl_seconds: u64,

    /// Login attempt limits
    pub login_limits: LoginRateLimits,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: 86_400,
            login_limits: LoginRateLimits::default(),
        }
    }
}
