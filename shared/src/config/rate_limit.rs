//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Login rate limits
    pub login: LoginRateLimits,

    /// Outbound email rate limits
    pub email: EmailRateLimits,

    /// General API rate limits
    pub api: ApiRateLimits,
}

/// Login-specific rate limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRateLimits {
    /// Max failed login attempts per account per window
    pub attempts_per_account: u32,

    /// Max login attempts per IP per window
    pub attempts_per_ip: u32,

    /// Rate limit window in seconds
    pub window_seconds: u64,
}

impl Default for LoginRateLimits {
    fn default() -> Self {
        Self {
            attempts_per_account: 5,
            attempts_per_ip: 20,
            window_seconds: 900, // 15 minutes
        }
    }
}

/// Outbound email rate limits, backed by the sent_emails audit log
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailRateLimits {
    /// Max emails of one kind per recipient per window
    pub per_recipient_per_window: u32,

    /// Throttle window in seconds
    pub window_seconds: u64,
}

impl Default for EmailRateLimits {
    fn default() -> Self {
        Self {
            per_recipient_per_window: 5,
            window_seconds: 3600, // 1 hour
        }
    }
}

/// General API rate limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiRateLimits {
    /// Max requests per IP per minute
    pub per_ip_per_minute: u32,
}

impl Default for ApiRateLimits {
    fn default() -> Self {
        Self {
            per_ip_per_minute: 60,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            login: LoginRateLimits::default(),
            email: EmailRateLimits::default(),
            api: ApiRateLimits::default(),
        }
    }
}

impl RateLimitConfig {
    /// Relaxed limits for development
    pub fn development() -> Self {
        Self {
            enabled: true,
            login: LoginRateLimits {
                attempts_per_account: 100,
                attempts_per_ip: 1000,
                window_seconds: 60,
            },
            email: EmailRateLimits {
                per_recipient_per_window: 100,
                window_seconds: 60,
            },
            api: ApiRateLimits {
                per_ip_per_minute: 1000,
            },
        }
    }

    /// Strict limits for production
    pub fn production() -> Self {
        Self::default()
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.login.attempts_per_account, 5);
        assert_eq!(config.email.per_recipient_per_window, 5);
    }

    #[test]
    fn test_development_is_relaxed() {
        let dev = RateLimitConfig::development();
        let prod = RateLimitConfig::production();
        assert!(dev.login.attempts_per_account > prod.login.attempts_per_account);
    }
}
