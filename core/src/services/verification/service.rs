//! One-time code issuance and verification service

use std::sync::Arc;

use tracing::{info, warn};
use ts_shared::types::Language;
use uuid::Uuid;

use crate::domain::entities::{CodePurpose, EmailKind, OneTimeCode, SentEmail, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{CodeRepository, EmailLogRepository};

use super::config::VerificationConfig;
use super::traits::{MailerTrait, OutgoingMail};

/// Service that issues one-time codes, emails them, and consumes them.
///
/// A code is consumable only while unused and inside its grace period, and
/// only the newest code issued for a purpose is ever consulted. Consuming a
/// code and applying its side effect (marking the user verified, or storing
/// a new password hash) happen in one repository transaction.
pub struct VerificationService<M, C, E>
where
    M: MailerTrait,
    C: CodeRepository,
    E: EmailLogRepository,
{
    mailer: Arc<M>,
    code_repository: Arc<C>,
    email_log: Arc<E>,
    config: VerificationConfig,
}

impl<M, C, E> VerificationService<M, C, E>
where
    M: MailerTrait,
    C: CodeRepository,
    E: EmailLogRepository,
{
    pub fn new(mailer: Arc<M>, code_repository: Arc<C>, email_log: Arc<E>) -> Self {
        Self::with_config(mailer, code_repository, email_log, VerificationConfig::default())
    }

    pub fn with_config(
        mailer: Arc<M>,
        code_repository: Arc<C>,
        email_log: Arc<E>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            mailer,
            code_repository,
            email_log,
            config,
        }
    }

    /// Issue a fresh code for the user and email it.
    ///
    /// Any earlier unused code for the same purpose is superseded: it stays
    /// in storage but can no longer be consumed.
    pub async fn issue_code(
        &self,
        user: &User,
        purpose: CodePurpose,
        workspace_name: &str,
        language: Language,
    ) -> DomainResult<OneTimeCode> {
        self.check_throttle(&user.email, purpose.email_kind()).await?;

        let grace_hours = match purpose {
            CodePurpose::EmailVerification => self.config.verification_grace_hours,
            CodePurpose::PasswordReset => self.config.reset_grace_hours,
        };
        let code = OneTimeCode::with_grace_period(user.id, purpose, grace_hours);
        let code = self.code_repository.create(code).await?;

        let mail = OutgoingMail {
            to: user.email.clone(),
            kind: purpose.email_kind(),
            language,
            code: Some(code.code.clone()),
            workspace_name: workspace_name.to_string(),
        };
        self.dispatch(user.workspace_id, mail).await?;

        info!(
            user_id = %user.id,
            purpose = purpose.as_str(),
            "One-time code issued"
        );
        Ok(code)
    }

    /// Email an already-persisted code, bypassing the throttle.
    ///
    /// Used right after registration, where the code was created inside
    /// the registration transaction.
    pub async fn send_code_email(
        &self,
        user: &User,
        code: &OneTimeCode,
        workspace_name: &str,
        language: Language,
    ) -> DomainResult<()> {
        let mail = OutgoingMail {
            to: user.email.clone(),
            kind: code.purpose.email_kind(),
            language,
            code: Some(code.code.clone()),
            workspace_name: workspace_name.to_string(),
        };
        self.dispatch(user.workspace_id, mail).await
    }

    /// Send a welcome email. Failures are logged but not surfaced; the
    /// welcome mail is not part of any operation's contract.
    pub async fn send_welcome_email(
        &self,
        user: &User,
        workspace_name: &str,
        language: Language,
    ) {
        let mail = OutgoingMail {
            to: user.email.clone(),
            kind: EmailKind::Welcome,
            language,
            code: None,
            workspace_name: workspace_name.to_string(),
        };
        if let Err(e) = self.dispatch(user.workspace_id, mail).await {
            warn!(user_id = %user.id, error = %e, "Welcome email failed");
        }
    }

    /// Consume an email-verification code and mark its user verified
    pub async fn consume_email_verification(
        &self,
        user_id: Uuid,
        submitted: &str,
    ) -> DomainResult<()> {
        let code = self
            .check_code(user_id, CodePurpose::EmailVerification, submitted)
            .await?;
        self.code_repository
            .activate_email_verification(code.id, user_id)
            .await?;

        info!(user_id = %user_id, "Email verified");
        Ok(())
    }

    /// Consume a password-reset code and store the user's new password hash
    pub async fn consume_password_reset(
        &self,
        user_id: Uuid,
        submitted: &str,
        new_password_hash: &str,
    ) -> DomainResult<()> {
        let code = self
            .check_code(user_id, CodePurpose::PasswordReset, submitted)
            .await?;
        self.code_repository
            .activate_password_reset(code.id, user_id, new_password_hash)
            .await?;

        info!(user_id = %user_id, "Password reset completed");
        Ok(())
    }

    /// Validate a submitted code against the newest one issued for the
    /// purpose. An already-used code is reported as such even if it has
    /// also lapsed.
    async fn check_code(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
        submitted: &str,
    ) -> DomainResult<OneTimeCode> {
        let code = self
            .code_repository
            .find_latest(user_id, purpose)
            .await?
            .ok_or(DomainError::Auth(AuthError::CodeInvalid))?;

        if !code.matches(submitted) {
            return Err(DomainError::Auth(AuthError::CodeInvalid));
        }
        if code.activated {
            return Err(DomainError::Auth(AuthError::CodeAlreadyUsed));
        }
        if code.is_expired() {
            return Err(DomainError::Auth(AuthError::CodeExpired));
        }
        Ok(code)
    }

    /// Refuse to send when the recipient already received the per-window
    /// quota of this email kind
    async fn check_throttle(&self, recipient: &str, kind: EmailKind) -> DomainResult<()> {
        let sent = self
            .email_log
            .count_recent(recipient, kind, self.config.throttle_window_seconds)
            .await?;
        if sent >= u64::from(self.config.max_emails_per_window) {
            warn!(kind = kind.as_str(), "Email throttle hit");
            return Err(DomainError::Auth(AuthError::RateLimitExceeded {
                minutes: (self.config.throttle_window_seconds / 60) as u32,
            }));
        }
        Ok(())
    }

    async fn dispatch(&self, workspace_id: Uuid, mail: OutgoingMail) -> DomainResult<()> {
        let recipient = mail.to.clone();
        let kind = mail.kind;

        self.mailer.send(mail).await.map_err(|e| {
            warn!(kind = kind.as_str(), error = %e, "Mail dispatch failed");
            DomainError::Auth(AuthError::MailServiceFailure)
        })?;

        self.email_log
            .record(SentEmail::new(Some(workspace_id), recipient, kind))
            .await
    }
}
