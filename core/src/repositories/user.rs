//! User repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{User, UserRole};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email within a workspace.
    ///
    /// The email is expected to be normalized (lowercased) by the caller.
    async fn find_by_email(
        &self,
        workspace_id: Uuid,
        email: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Update an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Active role assignments for a user
    async fn active_roles(&self, user_id: Uuid) -> Result<Vec<UserRole>, DomainError>;
}
