//! Mock implementations for testing the authentication service

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{SubscriptionFeature, User, UserRole, Workspace};
use crate::errors::DomainError;
use crate::repositories::{NewWorkspaceOwner, UserRepository, WorkspaceRepository};
use crate::services::auth::{RateLimiterTrait, SessionData, SessionStoreTrait};

// In-memory workspace repository
pub struct MockWorkspaceRepository {
    pub workspaces: Arc<Mutex<Vec<Workspace>>>,
    pub registrations: Arc<Mutex<Vec<NewWorkspaceOwner>>>,
    pub features: Arc<Mutex<Vec<SubscriptionFeature>>>,
}

impl MockWorkspaceRepository {
    pub fn new() -> Self {
        Self {
            workspaces: Arc::new(Mutex::new(Vec::new())),
            registrations: Arc::new(Mutex::new(Vec::new())),
            features: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seed(&self, workspace: Workspace) {
        self.workspaces.lock().unwrap().push(workspace);
    }
}

#[async_trait]
impl WorkspaceRepository for MockWorkspaceRepository {
    async fn find_active_by_url(
        &self,
        workspace_url: &str,
    ) -> Result<Option<Workspace>, DomainError> {
        let workspaces = self.workspaces.lock().unwrap();
        Ok(workspaces
            .iter()
            .find(|w| w.is_active && w.workspace_url == workspace_url)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Workspace>, DomainError> {
        let workspaces = self.workspaces.lock().unwrap();
        Ok(workspaces.iter().find(|w| w.id == id).cloned())
    }

    async fn exists_active_url(&self, workspace_url: &str) -> Result<bool, DomainError> {
        Ok(self.find_active_by_url(workspace_url).await?.is_some())
    }

    async fn create_with_owner(
        &self,
        registration: NewWorkspaceOwner,
    ) -> Result<Workspace, DomainError> {
        let workspace = registration.workspace.clone();
        self.workspaces.lock().unwrap().push(workspace.clone());
        self.registrations.lock().unwrap().push(registration);
        Ok(workspace)
    }

    async fn update(&self, workspace: Workspace) -> Result<Workspace, DomainError> {
        let mut workspaces = self.workspaces.lock().unwrap();
        if let Some(existing) = workspaces.iter_mut().find(|w| w.id == workspace.id) {
            *existing = workspace.clone();
        }
        Ok(workspace)
    }

    async fn features_for_subscription(
        &self,
        subscription_id: i32,
    ) -> Result<Vec<SubscriptionFeature>, DomainError> {
        let features = self.features.lock().unwrap();
        Ok(features
            .iter()
            .filter(|f| f.subscription_id == subscription_id)
            .cloned()
            .collect())
    }
}

// In-memory user repository
pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<User>>>,
    pub roles: Arc<Mutex<Vec<UserRole>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            roles: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seed(&self, user: User, roles: Vec<UserRole>) {
        self.users.lock().unwrap().push(user);
        self.roles.lock().unwrap().extend(roles);
    }

    pub fn get(&self, user_id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == user_id).cloned()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(
        &self,
        workspace_id: Uuid,
        email: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.workspace_id == workspace_id && u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.get(id))
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        Ok(user)
    }

    async fn active_roles(&self, user_id: Uuid) -> Result<Vec<UserRole>, DomainError> {
        let roles = self.roles.lock().unwrap();
        Ok(roles
            .iter()
            .filter(|r| r.user_id == user_id && r.is_active)
            .cloned()
            .collect())
    }
}

// Rate limiter with switchable verdicts
pub struct MockRateLimiter {
    pub allow_account: bool,
    pub allow_ip: bool,
    pub account_failures: Arc<Mutex<i64>>,
    pub ip_attempts: Arc<Mutex<i64>>,
    pub cleared: Arc<Mutex<bool>>,
}

impl MockRateLimiter {
    pub fn allowing() -> Self {
        Self {
            allow_account: true,
            allow_ip: true,
            account_failures: Arc::new(Mutex::new(0)),
            ip_attempts: Arc::new(Mutex::new(0)),
            cleared: Arc::new(Mutex::new(false)),
        }
    }

    pub fn blocking_account() -> Self {
        Self {
            allow_account: false,
            ..Self::allowing()
        }
    }

    pub fn blocking_ip() -> Self {
        Self {
            allow_ip: false,
            ..Self::allowing()
        }
    }
}

#[async_trait]
impl RateLimiterTrait for MockRateLimiter {
    async fn check_account_limit(&self, _workspace_id: Uuid, _email: &str) -> Result<bool, String> {
        Ok(self.allow_account)
    }

    async fn record_account_failure(&self, _workspace_id: Uuid, _email: &str) -> Result<i64, String> {
        let mut failures = self.account_failures.lock().unwrap();
        *failures += 1;
        Ok(*failures)
    }

    async fn clear_account_failures(&self, _workspace_id: Uuid, _email: &str) -> Result<(), String> {
        *self.cleared.lock().unwrap() = true;
        Ok(())
    }

    async fn check_ip_limit(&self, _ip: &str) -> Result<bool, String> {
        Ok(self.allow_ip)
    }

    async fn record_ip_attempt(&self, _ip: &str) -> Result<i64, String> {
        let mut attempts = self.ip_attempts.lock().unwrap();
        *attempts += 1;
        Ok(*attempts)
    }
}

// In-memory session store
pub struct MockSessionStore {
    pub sessions: Arc<Mutex<HashMap<String, SessionData>>>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStoreTrait for MockSessionStore {
    async fn create(&self, data: &SessionData, _ttl_seconds: u64) -> Result<String, String> {
        let session_id = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .unwrap()
            .insert(session_id.clone(), data.clone());
        Ok(session_id)
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, String> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn destroy(&self, session_id: &str) -> Result<(), String> {
        self.sessions.lock().unwrap().remove(session_id);
        Ok(())
    }

    async fn destroy_all_for_user(&self, user_id: Uuid) -> Result<u64, String> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, data| data.user_id != user_id);
        Ok((before - sessions.len()) as u64)
    }
}
