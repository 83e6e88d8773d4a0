//! One-time code entity for email verification and password reset.
//!
//! A code moves through exactly three states: unused, activated, or expired
//! by timestamp. It is valid only while `activated` is false and the current
//! time falls within `[created_at, created_at + grace_period_hours)`.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sent_email::EmailKind;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Default grace period for email verification codes (hours)
pub const EMAIL_VERIFICATION_GRACE_HOURS: i64 = 24;

/// Default grace period for password reset codes (hours)
pub const PASSWORD_RESET_GRACE_HOURS: i64 = 2;

/// Purpose of a one-time code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    EmailVerification,
    PasswordReset,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::EmailVerification => "email_verification",
            CodePurpose::PasswordReset => "password_reset",
        }
    }

    /// Default grace period in hours for this purpose
    pub fn default_grace_hours(&self) -> i64 {
        match self {
            CodePurpose::EmailVerification => EMAIL_VERIFICATION_GRACE_HOURS,
            CodePurpose::PasswordReset => PASSWORD_RESET_GRACE_HOURS,
        }
    }

    /// The email kind used to deliver codes of this purpose
    pub fn email_kind(&self) -> EmailKind {
        match self {
            CodePurpose::EmailVerification => EmailKind::Verification,
            CodePurpose::PasswordReset => EmailKind::PasswordReset,
        }
    }
}

impl std::str::FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email_verification" => Ok(CodePurpose::EmailVerification),
            "password_reset" => Ok(CodePurpose::PasswordReset),
            other => Err(format!("Unknown code purpose: {}", other)),
        }
    }
}

/// One-time code entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeCode {
    /// Unique identifier for the code
    pub id: Uuid,

    /// User this code was issued to
    pub user_id: Uuid,

    /// What the code is for
    pub purpose: CodePurpose,

    /// The 6-digit code value
    pub code: String,

    /// Whether the code has been consumed; transitions once, never back
    pub activated: bool,

    /// Validity window in hours from creation
    pub grace_period_hours: i64,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,
}

impl OneTimeCode {
    /// Creates a new code for a user with the purpose's default grace period
    pub fn new(user_id: Uuid, purpose: CodePurpose) -> Self {
        Self::with_grace_period(user_id, purpose, purpose.default_grace_hours())
    }

    /// Creates a new code with an explicit grace period in hours
    pub fn with_grace_period(user_id: Uuid, purpose: CodePurpose, grace_period_hours: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            purpose,
            code: Self::generate_code(),
            activated: false,
            grace_period_hours,
            created_at: Utc::now(),
        }
    }

    /// Generates a random 6-digit code
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// Timestamp at which the validity window closes
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::hours(self.grace_period_hours)
    }

    /// Checks if the grace period has lapsed
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at()
    }

    /// A code is valid while unused and inside its grace period
    pub fn is_valid(&self) -> bool {
        !self.activated && !self.is_expired()
    }

    /// Constant-time comparison of a submitted code against this one
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Marks the code as consumed
    pub fn activate(&mut self) {
        self.activated = true;
    }
}
