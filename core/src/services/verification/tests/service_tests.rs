//! Unit tests for the verification service

use std::sync::Arc;

use chrono::{Duration, Utc};
use ts_shared::types::Language;
use uuid::Uuid;

use crate::domain::entities::one_time_code::CODE_LENGTH;
use crate::domain::entities::{CodePurpose, EmailKind, OneTimeCode, User};
use crate::errors::{AuthError, DomainError};
use crate::services::verification::{VerificationConfig, VerificationService};

use super::mocks::{MockCodeRepository, MockEmailLog, MockMailer};

fn sample_user() -> User {
    User::new(
        Uuid::new_v4(),
        "user@example.com".to_string(),
        "$2b$12$hash".to_string(),
        "Ada".to_string(),
        "Lovelace".to_string(),
        None,
    )
}

fn service(
    mailer: Arc<MockMailer>,
    codes: Arc<MockCodeRepository>,
    log: Arc<MockEmailLog>,
) -> VerificationService<MockMailer, MockCodeRepository, MockEmailLog> {
    VerificationService::new(mailer, codes, log)
}

#[tokio::test]
async fn test_issue_code_sends_email_and_logs() {
    let mailer = Arc::new(MockMailer::new(false));
    let codes = Arc::new(MockCodeRepository::new(false));
    let log = Arc::new(MockEmailLog::new());
    let service = service(mailer.clone(), codes.clone(), log.clone());
    let user = sample_user();

    let code = service
        .issue_code(&user, CodePurpose::EmailVerification, "Acme", Language::English)
        .await
        .unwrap();

    assert_eq!(code.code.len(), CODE_LENGTH);
    assert_eq!(code.user_id, user.id);

    let mail = mailer.last_sent().unwrap();
    assert_eq!(mail.to, user.email);
    assert_eq!(mail.kind, EmailKind::Verification);
    assert_eq!(mail.code.as_deref(), Some(code.code.as_str()));
    assert_eq!(mail.workspace_name, "Acme");

    assert_eq!(log.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_issue_code_reset_uses_shorter_grace_period() {
    let service = service(
        Arc::new(MockMailer::new(false)),
        Arc::new(MockCodeRepository::new(false)),
        Arc::new(MockEmailLog::new()),
    );
    let user = sample_user();

    let code = service
        .issue_code(&user, CodePurpose::PasswordReset, "Acme", Language::Spanish)
        .await
        .unwrap();

    assert_eq!(code.grace_period_hours, 2);
    assert_eq!(code.purpose, CodePurpose::PasswordReset);
}

#[tokio::test]
async fn test_issue_code_throttled() {
    let mailer = Arc::new(MockMailer::new(false));
    let codes = Arc::new(MockCodeRepository::new(false));
    let log = Arc::new(MockEmailLog::new());
    log.seed_recent("user@example.com", EmailKind::Verification, 5);

    let service = VerificationService::with_config(
        mailer.clone(),
        codes,
        log,
        VerificationConfig::default(),
    );
    let user = sample_user();

    let result = service
        .issue_code(&user, CodePurpose::EmailVerification, "Acme", Language::English)
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::RateLimitExceeded { minutes: 60 }))
    ));
    assert!(mailer.last_sent().is_none());
}

#[tokio::test]
async fn test_issue_code_mail_failure_surfaced() {
    let service = service(
        Arc::new(MockMailer::new(true)),
        Arc::new(MockCodeRepository::new(false)),
        Arc::new(MockEmailLog::new()),
    );
    let user = sample_user();

    let result = service
        .issue_code(&user, CodePurpose::EmailVerification, "Acme", Language::English)
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::MailServiceFailure))
    ));
}

#[tokio::test]
async fn test_consume_email_verification_success() {
    let codes = Arc::new(MockCodeRepository::new(false));
    let service = service(
        Arc::new(MockMailer::new(false)),
        codes.clone(),
        Arc::new(MockEmailLog::new()),
    );
    let user = sample_user();
    let code = OneTimeCode::new(user.id, CodePurpose::EmailVerification);
    let value = code.code.clone();
    codes.seed(code);

    service
        .consume_email_verification(user.id, &value)
        .await
        .unwrap();

    assert_eq!(codes.verified_users.lock().unwrap().as_slice(), &[user.id]);
    assert!(codes.codes.lock().unwrap()[0].activated);
}

#[tokio::test]
async fn test_consume_wrong_code_rejected() {
    let codes = Arc::new(MockCodeRepository::new(false));
    let service = service(
        Arc::new(MockMailer::new(false)),
        codes.clone(),
        Arc::new(MockEmailLog::new()),
    );
    let user = sample_user();
    let mut code = OneTimeCode::new(user.id, CodePurpose::EmailVerification);
    code.code = "123456".to_string();
    codes.seed(code);

    let result = service.consume_email_verification(user.id, "654321").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeInvalid))
    ));
    assert!(codes.verified_users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_consume_without_any_code_rejected() {
    let service = service(
        Arc::new(MockMailer::new(false)),
        Arc::new(MockCodeRepository::new(false)),
        Arc::new(MockEmailLog::new()),
    );

    let result = service
        .consume_email_verification(Uuid::new_v4(), "123456")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeInvalid))
    ));
}

#[tokio::test]
async fn test_consume_used_code_reported_as_used_even_when_expired() {
    let codes = Arc::new(MockCodeRepository::new(false));
    let service = service(
        Arc::new(MockMailer::new(false)),
        codes.clone(),
        Arc::new(MockEmailLog::new()),
    );
    let user = sample_user();
    let mut code = OneTimeCode::new(user.id, CodePurpose::EmailVerification);
    code.activated = true;
    code.created_at = Utc::now() - Duration::hours(48);
    let value = code.code.clone();
    codes.seed(code);

    let result = service.consume_email_verification(user.id, &value).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeAlreadyUsed))
    ));
}

#[tokio::test]
async fn test_consume_expired_code_rejected() {
    let codes = Arc::new(MockCodeRepository::new(false));
    let service = service(
        Arc::new(MockMailer::new(false)),
        codes.clone(),
        Arc::new(MockEmailLog::new()),
    );
    let user = sample_user();
    let mut code = OneTimeCode::new(user.id, CodePurpose::PasswordReset);
    code.created_at = Utc::now() - Duration::hours(3);
    let value = code.code.clone();
    codes.seed(code);

    let result = service
        .consume_password_reset(user.id, &value, "$2b$12$newhash")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeExpired))
    ));
    assert!(codes.password_updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_only_newest_code_is_consulted() {
    let codes = Arc::new(MockCodeRepository::new(false));
    let service = service(
        Arc::new(MockMailer::new(false)),
        codes.clone(),
        Arc::new(MockEmailLog::new()),
    );
    let user = sample_user();

    let mut older = OneTimeCode::new(user.id, CodePurpose::PasswordReset);
    older.created_at = Utc::now() - Duration::minutes(10);
    let older_value = older.code.clone();
    codes.seed(older);

    let mut newer = OneTimeCode::new(user.id, CodePurpose::PasswordReset);
    // Guard against the one-in-a-million collision
    if newer.code == older_value {
        newer.code = if older_value == "000000" {
            "000001".to_string()
        } else {
            "000000".to_string()
        };
    }
    let newer_value = newer.code.clone();
    codes.seed(newer);

    let result = service
        .consume_password_reset(user.id, &older_value, "$2b$12$newhash")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeInvalid))
    ));

    service
        .consume_password_reset(user.id, &newer_value, "$2b$12$newhash")
        .await
        .unwrap();

    let updates = codes.password_updates.lock().unwrap();
    assert_eq!(updates.as_slice(), &[(user.id, "$2b$12$newhash".to_string())]);
}

#[tokio::test]
async fn test_welcome_email_failure_is_swallowed() {
    let log = Arc::new(MockEmailLog::new());
    let service = service(
        Arc::new(MockMailer::new(true)),
        Arc::new(MockCodeRepository::new(false)),
        log.clone(),
    );
    let user = sample_user();

    // Must not panic or surface an error
    service
        .send_welcome_email(&user, "Acme", Language::English)
        .await;
    assert!(log.rows.lock().unwrap().is_empty());
}
