//! One-time code repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{CodePurpose, OneTimeCode};
use crate::errors::DomainError;

/// Repository trait for one-time code persistence.
///
/// Codes are never deleted; they transition once from unused to activated.
/// The two `activate_*` operations bundle the code activation with its
/// side effect in a single transaction.
#[async_trait]
pub trait CodeRepository: Send + Sync {
    /// Persist a freshly issued code
    async fn create(&self, code: OneTimeCode) -> Result<OneTimeCode, DomainError>;

    /// The newest code issued to a user for a purpose, used or not.
    ///
    /// Older unused codes are simply never consulted; only the newest one
    /// can be activated.
    async fn find_latest(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>, DomainError>;

    /// Activate an email-verification code and mark its user verified,
    /// atomically.
    async fn activate_email_verification(
        &self,
        code_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DomainError>;

    /// Activate a password-reset code and store the user's new password
    /// hash, atomically.
    async fn activate_password_reset(
        &self,
        code_id: Uuid,
        user_id: Uuid,
        new_password_hash: &str,
    ) -> Result<(), DomainError>;
}
