//! Subscription feature entitlements.

use serde::{Deserialize, Serialize};

/// Feature entitlement row keyed by subscription plan id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionFeature {
    /// Row id
    pub id: i32,

    /// Subscription plan this entitlement belongs to
    pub subscription_id: i32,

    /// Feature key, e.g. "sso", "audit_log", "custom_branding"
    pub feature: String,

    /// Whether the feature is enabled for the plan
    pub enabled: bool,

    /// Optional numeric quota (e.g. seat limit); None means unlimited
    pub quota: Option<i64>,
}

impl SubscriptionFeature {
    /// Whether usage of `count` items is within the quota
    pub fn within_quota(&self, count: i64) -> bool {
        self.enabled && self.quota.map_or(true, |q| count <= q)
    }
}
