//! Mock implementations for testing the verification service

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::{CodePurpose, EmailKind, OneTimeCode, SentEmail};
use crate::errors::DomainError;
use crate::repositories::{CodeRepository, EmailLogRepository};
use crate::services::verification::{MailerTrait, OutgoingMail};

// Mock mailer capturing every outgoing email
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<OutgoingMail>>>,
    pub should_fail: bool,
}

impl MockMailer {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn last_sent(&self) -> Option<OutgoingMail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<String, String> {
        if self.should_fail {
            return Err("Mail service error".to_string());
        }
        self.sent.lock().unwrap().push(mail);
        Ok(format!("mock-msg-{}", Uuid::new_v4()))
    }
}

// In-memory code repository
pub struct MockCodeRepository {
    pub codes: Arc<Mutex<Vec<OneTimeCode>>>,
    pub verified_users: Arc<Mutex<Vec<Uuid>>>,
    pub password_updates: Arc<Mutex<Vec<(Uuid, String)>>>,
    pub should_fail: bool,
}

impl MockCodeRepository {
    pub fn new(should_fail: bool) -> Self {
        Self {
            codes: Arc::new(Mutex::new(Vec::new())),
            verified_users: Arc::new(Mutex::new(Vec::new())),
            password_updates: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn seed(&self, code: OneTimeCode) {
        self.codes.lock().unwrap().push(code);
    }
}

#[async_trait]
impl CodeRepository for MockCodeRepository {
    async fn create(&self, code: OneTimeCode) -> Result<OneTimeCode, DomainError> {
        if self.should_fail {
            return Err(DomainError::Database {
                message: "Mock database error".to_string(),
            });
        }
        self.codes.lock().unwrap().push(code.clone());
        Ok(code)
    }

    async fn find_latest(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> Result<Option<OneTimeCode>, DomainError> {
        if self.should_fail {
            return Err(DomainError::Database {
                message: "Mock database error".to_string(),
            });
        }
        let codes = self.codes.lock().unwrap();
        Ok(codes
            .iter()
            .filter(|c| c.user_id == user_id && c.purpose == purpose)
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn activate_email_verification(
        &self,
        code_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        let mut codes = self.codes.lock().unwrap();
        if let Some(code) = codes.iter_mut().find(|c| c.id == code_id) {
            code.activate();
        }
        self.verified_users.lock().unwrap().push(user_id);
        Ok(())
    }

    async fn activate_password_reset(
        &self,
        code_id: Uuid,
        user_id: Uuid,
        new_password_hash: &str,
    ) -> Result<(), DomainError> {
        let mut codes = self.codes.lock().unwrap();
        if let Some(code) = codes.iter_mut().find(|c| c.id == code_id) {
            code.activate();
        }
        self.password_updates
            .lock()
            .unwrap()
            .push((user_id, new_password_hash.to_string()));
        Ok(())
    }
}

// In-memory sent-email log
pub struct MockEmailLog {
    pub rows: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockEmailLog {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-populate the log so the throttle sees `count` recent sends
    pub fn seed_recent(&self, recipient: &str, kind: EmailKind, count: usize) {
        let mut rows = self.rows.lock().unwrap();
        for _ in 0..count {
            rows.push(SentEmail::new(None, recipient.to_string(), kind));
        }
    }
}

#[async_trait]
impl EmailLogRepository for MockEmailLog {
    async fn record(&self, email: SentEmail) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(email);
        Ok(())
    }

    async fn count_recent(
        &self,
        recipient: &str,
        kind: EmailKind,
        window_seconds: u64,
    ) -> Result<u64, DomainError> {
        let cutoff = Utc::now() - Duration::seconds(window_seconds as i64);
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.recipient == recipient && r.kind == kind && r.sent_at >= cutoff)
            .count() as u64)
    }
}
