//! Workspace repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{OneTimeCode, SubscriptionFeature, User, UserRole, Workspace};
use crate::errors::DomainError;

/// Everything that must be persisted atomically when a workspace registers:
/// the tenant row, its owner account, the owner role, and the initial
/// email-verification code.
#[derive(Debug, Clone)]
pub struct NewWorkspaceOwner {
    pub workspace: Workspace,
    pub owner: User,
    pub owner_role: UserRole,
    pub verification_code: OneTimeCode,
}

/// Repository trait for Workspace entity persistence operations
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Find an active workspace by its subdomain slug
    async fn find_active_by_url(&self, workspace_url: &str) -> Result<Option<Workspace>, DomainError>;

    /// Find a workspace by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Workspace>, DomainError>;

    /// Check whether an active workspace already holds the given slug
    async fn exists_active_url(&self, workspace_url: &str) -> Result<bool, DomainError>;

    /// Persist a complete registration in a single transaction.
    ///
    /// All four inserts succeed or none do; any failure rolls the whole
    /// registration back.
    async fn create_with_owner(&self, registration: NewWorkspaceOwner) -> Result<Workspace, DomainError>;

    /// Update an existing workspace
    async fn update(&self, workspace: Workspace) -> Result<Workspace, DomainError>;

    /// Feature entitlements for a subscription plan
    async fn features_for_subscription(
        &self,
        subscription_id: i32,
    ) -> Result<Vec<SubscriptionFeature>, DomainError>;
}
