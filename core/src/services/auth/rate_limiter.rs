//! Rate limiting trait for login attempts

use async_trait::async_trait;
use uuid::Uuid;

/// Rate limiting service trait for tracking login attempts.
///
/// Accounts are tracked per workspace so the same email address in two
/// tenants counts separately.
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Check if an account is still allowed to attempt a login
    async fn check_account_limit(&self, workspace_id: Uuid, email: &str) -> Result<bool, String>;

    /// Record a failed login attempt against an account, returning the
    /// updated counter
    async fn record_account_failure(&self, workspace_id: Uuid, email: &str) -> Result<i64, String>;

    /// Clear the failure counter after a successful login
    async fn clear_account_failures(&self, workspace_id: Uuid, email: &str) -> Result<(), String>;

    /// Check if an IP is still allowed to attempt a login
    async fn check_ip_limit(&self, ip: &str) -> Result<bool, String>;

    /// Record a login attempt from an IP, returning the updated counter
    async fn record_ip_attempt(&self, ip: &str) -> Result<i64, String>;
}
