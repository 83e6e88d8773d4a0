//! User entity representing a per-workspace account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_shared::types::Language;
use uuid::Uuid;

/// User entity: one account within a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Workspace this user belongs to
    pub workspace_id: Uuid,

    /// Lowercased email address (unique within the workspace)
    pub email: String,

    /// Bcrypt password hash; never serialized in responses
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Explicit language preference; falls back to the workspace default
    pub language: Option<Language>,

    /// Whether the user's email address has been verified
    pub is_verified: bool,

    /// Whether the account is active
    pub is_active: bool,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified, active user
    pub fn new(
        workspace_id: Uuid,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        language: Option<Language>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            email,
            password_hash,
            first_name,
            last_name,
            language,
            is_verified: false,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the user's email as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Effective language for this user given the workspace default
    pub fn effective_language(&self, workspace_default: Language) -> Language {
        self.language.unwrap_or(workspace_default)
    }
}
