//! Redis-backed implementation of the login rate limiter.
//!
//! Counters are plain INCR keys whose TTL is the configured window, so a
//! window rolls over by key expiry rather than bookkeeping.

use async_trait::async_trait;
use uuid::Uuid;

use ts_core::services::auth::RateLimiterTrait;
use ts_shared::config::rate_limit::LoginRateLimits;

use super::redis_client::RedisClient;

/// Redis implementation of RateLimiterTrait
#[derive(Clone)]
pub struct RedisRateLimiter {
    client: RedisClient,
    limits: LoginRateLimits,
}

impl RedisRateLimiter {
    pub fn new(client: RedisClient, limits: LoginRateLimits) -> Self {
        Self { client, limits }
    }

    fn account_key(workspace_id: Uuid, email: &str) -> String {
        format!("login:fail:{}:{}", workspace_id, email)
    }

    fn ip_key(ip: &str) -> String {
        format!("login:ip:{}", ip)
    }

    async fn counter(&self, key: &str) -> Result<i64, String> {
        let value = self.client.get(key).await.map_err(|e| e.to_string())?;
        Ok(value.and_then(|v| v.parse::<i64>().ok()).unwrap_or(0))
    }
}

#[async_trait]
impl RateLimiterTrait for RedisRateLimiter {
    async fn check_account_limit(&self, workspace_id: Uuid, email: &str) -> Result<bool, String> {
        let failures = self.counter(&Self::account_key(workspace_id, email)).await?;
        Ok(failures < i64::from(self.limits.attempts_per_account))
    }

    async fn record_account_failure(&self, workspace_id: Uuid, email: &str) -> Result<i64, String> {
        self.client
            .increment(
                &Self::account_key(workspace_id, email),
                Some(self.limits.window_seconds),
            )
            .await
            .map_err(|e| e.to_string())
    }

    async fn clear_account_failures(&self, workspace_id: Uuid, email: &str) -> Result<(), String> {
        self.client
            .delete(&Self::account_key(workspace_id, email))
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    async fn check_ip_limit(&self, ip: &str) -> Result<bool, String> {
        let attempts = self.counter(&Self::ip_key(ip)).await?;
        Ok(attempts < i64::from(self.limits.attempts_per_ip))
    }

    async fn record_ip_attempt(&self, ip: &str) -> Result<i64, String> {
        self.client
            .increment(&Self::ip_key(ip), Some(self.limits.window_seconds))
            .await
            .map_err(|e| e.to_string())
    }
}
