//! Session store trait for cookie-based authentication

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a session resolves to. Everything else about the user is read
/// from the database on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Authenticated user
    pub user_id: Uuid,

    /// Workspace the session was opened in
    pub workspace_id: Uuid,
}

/// Trait for the opaque-session store backing cookie authentication.
///
/// Session ids are opaque to callers; the store generates them and maps
/// them back to `SessionData` until the TTL lapses or the session is
/// destroyed.
#[async_trait]
pub trait SessionStoreTrait: Send + Sync {
    /// Open a session, returning the opaque session id
    async fn create(&self, data: &SessionData, ttl_seconds: u64) -> Result<String, String>;

    /// Resolve a session id; None when unknown or expired
    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, String>;

    /// Destroy one session
    async fn destroy(&self, session_id: &str) -> Result<(), String>;

    /// Destroy every session belonging to a user, returning how many
    /// were removed. Used after a password reset.
    async fn destroy_all_for_user(&self, user_id: Uuid) -> Result<u64, String>;
}
