//! Configuration for the verification service

use ts_shared::config::rate_limit::EmailRateLimits;

use crate::domain::entities::one_time_code::{
    EMAIL_VERIFICATION_GRACE_HOURS, PASSWORD_RESET_GRACE_HOURS,
};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Grace period for email-verification codes in hours
    pub verification_grace_hours: i64,

    /// Grace period for password-reset codes in hours
    pub reset_grace_hours: i64,

    /// Max emails of one kind per recipient per throttle window
    pub max_emails_per_window: u32,

    /// Throttle window in seconds
    pub throttle_window_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            verification_grace_hours: EMAIL_VERIFICATION_GRACE_HOURS,
            reset_grace_hours: PASSWORD_RESET_GRACE_HOURS,
            max_emails_per_window: 5,
            throttle_window_seconds: 3600,
        }
    }
}

impl From<&EmailRateLimits> for VerificationConfig {
    fn from(limits: &EmailRateLimits) -> Self {
        Self {
            max_emails_per_window: limits.per_recipient_per_window,
            throttle_window_seconds: limits.window_seconds,
            ..Default::default()
        }
    }
}
