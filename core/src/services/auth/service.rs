//! Authentication service orchestrating registration, login, and the
//! one-time code flows.

use std::sync::Arc;

use tracing::{info, warn};
use ts_shared::types::Language;
use ts_shared::utils::validation::{
    is_valid_email, is_valid_workspace_url, normalize_email, normalize_workspace_url,
};
use uuid::Uuid;

use crate::domain::entities::{
    CodePurpose, OneTimeCode, Role, SubscriptionFeature, User, UserRole, Workspace,
};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{
    CodeRepository, EmailLogRepository, NewWorkspaceOwner, UserRepository, WorkspaceRepository,
};
use crate::services::password::{
    is_acceptable_password, PasswordHasher, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
use crate::services::token::TokenService;
use crate::services::verification::{MailerTrait, VerificationService};

use super::config::AuthServiceConfig;
use super::rate_limiter::RateLimiterTrait;
use super::session::{SessionData, SessionStoreTrait};

/// Everything a new tenant submits at registration
#[derive(Debug, Clone)]
pub struct WorkspaceRegistration {
    pub workspace_name: String,
    pub workspace_url: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub language: Option<Language>,
}

/// Authentication service.
///
/// Holds the repositories and collaborating services behind generics so
/// tests can swap in mocks. Multi-step writes (registration, code
/// consumption) are delegated to repository methods that run them in one
/// transaction.
pub struct AuthService<W, U, M, C, E, R, S>
where
    W: WorkspaceRepository,
    U: UserRepository,
    M: MailerTrait,
    C: CodeRepository,
    E: EmailLogRepository,
    R: RateLimiterTrait,
    S: SessionStoreTrait,
{
    workspace_repository: Arc<W>,
    user_repository: Arc<U>,
    verification: VerificationService<M, C, E>,
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
    rate_limiter: Arc<R>,
    sessions: Arc<S>,
    config: AuthServiceConfig,
}

impl<W, U, M, C, E, R, S> AuthService<W, U, M, C, E, R, S>
where
    W: WorkspaceRepository,
    U: UserRepository,
    M: MailerTrait,
    C: CodeRepository,
    E: EmailLogRepository,
    R: RateLimiterTrait,
    S: SessionStoreTrait,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        workspace_repository: Arc<W>,
        user_repository: Arc<U>,
        verification: VerificationService<M, C, E>,
        token_service: Arc<TokenService>,
        password_hasher: PasswordHasher,
        rate_limiter: Arc<R>,
        sessions: Arc<S>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            workspace_repository,
            user_repository,
            verification,
            token_service,
            password_hasher,
            rate_limiter,
            sessions,
            config,
        }
    }

    /// Register a new workspace together with its owner account.
    ///
    /// The workspace row, owner user, owner role, and initial
    /// email-verification code are persisted in one transaction. The
    /// verification email is sent after commit; a mail failure leaves the
    /// registration intact since the code can be re-sent.
    pub async fn register_workspace(
        &self,
        registration: WorkspaceRegistration,
    ) -> DomainResult<Workspace> {
        let workspace_url = normalize_workspace_url(&registration.workspace_url);
        let email = normalize_email(&registration.email);

        if !is_valid_workspace_url(&workspace_url) {
            return Err(ValidationError::InvalidWorkspaceUrl.into());
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !is_acceptable_password(&registration.password) {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                min: MIN_PASSWORD_LENGTH,
                max: MAX_PASSWORD_LENGTH,
            }
            .into());
        }
        if self.workspace_repository.exists_active_url(&workspace_url).await? {
            return Err(AuthError::WorkspaceUrlTaken { workspace_url }.into());
        }

        let language = registration.language.unwrap_or_default();
        let workspace = Workspace::new(
            workspace_url,
            registration.workspace_name,
            1,
            language,
        );
        let password_hash = self.password_hasher.hash(&registration.password)?;
        let owner = User::new(
            workspace.id,
            email,
            password_hash,
            registration.first_name,
            registration.last_name,
            registration.language,
        );
        let owner_role = UserRole::new(owner.id, Role::Owner);
        let verification_code = OneTimeCode::new(owner.id, CodePurpose::EmailVerification);

        let workspace = self
            .workspace_repository
            .create_with_owner(NewWorkspaceOwner {
                workspace,
                owner: owner.clone(),
                owner_role,
                verification_code: verification_code.clone(),
            })
            .await?;

        info!(
            workspace_id = %workspace.id,
            workspace_url = %workspace.workspace_url,
            "Workspace registered"
        );

        if let Err(e) = self
            .verification
            .send_code_email(&owner, &verification_code, &workspace.name, language)
            .await
        {
            warn!(
                workspace_id = %workspace.id,
                error = %e,
                "Verification email failed after registration"
            );
        }

        Ok(workspace)
    }

    /// Authenticate a user within a workspace and open both credentials:
    /// a JWT access token and a Redis-backed session.
    pub async fn login(
        &self,
        workspace_url: &str,
        email: &str,
        password: &str,
        client_ip: &str,
    ) -> DomainResult<AuthResponse> {
        let workspace = self.resolve_workspace(workspace_url).await?;
        let email = normalize_email(email);

        self.enforce_login_limits(workspace.id, &email, client_ip).await?;

        let user = match self
            .user_repository
            .find_by_email(workspace.id, &email)
            .await?
        {
            Some(user) if self.password_hasher.verify(password, &user.password_hash)? => user,
            _ => {
                // Unknown user and wrong password look identical to the caller
                self.record_login_failure(workspace.id, &email).await;
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !user.is_active {
            return Err(AuthError::AccountDeactivated.into());
        }
        if !user.is_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        if let Err(e) = self
            .rate_limiter
            .clear_account_failures(workspace.id, &email)
            .await
        {
            warn!(error = %e, "Failed to clear login failure counter");
        }

        let mut user = user;
        user.update_last_login();
        let user = self.user_repository.update(user).await?;

        let role = self.primary_role(user.id).await?;
        let access_token = self.token_service.generate_access_token(
            user.id,
            workspace.id,
            role,
            user.is_verified,
        )?;
        let session_id = self
            .sessions
            .create(
                &SessionData {
                    user_id: user.id,
                    workspace_id: workspace.id,
                },
                self.config.session_ttl_seconds,
            )
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Session creation failed: {}", e),
            })?;

        info!(user_id = %user.id, workspace_id = %workspace.id, "Login succeeded");

        Ok(AuthResponse::new(
            access_token,
            self.token_service.access_token_expiry(),
            session_id,
            user.id,
            role,
        ))
    }

    /// Destroy one session
    pub async fn logout(&self, session_id: &str) -> DomainResult<()> {
        self.sessions
            .destroy(session_id)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Session destroy failed: {}", e),
            })
    }

    /// Resolve a session cookie to its session data
    pub async fn resolve_session(&self, session_id: &str) -> DomainResult<SessionData> {
        self.sessions
            .get(session_id)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Session lookup failed: {}", e),
            })?
            .ok_or_else(|| AuthError::SessionExpired.into())
    }

    /// Consume an email-verification code for the user identified by email
    /// within the workspace.
    ///
    /// An unknown email reports the same error as a mismatched code.
    pub async fn verify_email(
        &self,
        workspace_url: &str,
        email: &str,
        code: &str,
    ) -> DomainResult<()> {
        let workspace = self.resolve_workspace(workspace_url).await?;
        let user = self
            .user_repository
            .find_by_email(workspace.id, &normalize_email(email))
            .await?
            .ok_or(DomainError::Auth(AuthError::CodeInvalid))?;

        self.verification
            .consume_email_verification(user.id, code)
            .await
    }

    /// Issue and send a fresh email-verification code.
    ///
    /// Responds identically whether or not the account exists: a missing
    /// or already-verified account is a silent no-op, and throttle or mail
    /// failures for a real account are logged without surfacing, so the
    /// response never distinguishes the two paths.
    pub async fn request_email_verification(
        &self,
        workspace_url: &str,
        email: &str,
    ) -> DomainResult<()> {
        let workspace = self.resolve_workspace(workspace_url).await?;
        let user = self
            .user_repository
            .find_by_email(workspace.id, &normalize_email(email))
            .await?;

        if let Some(user) = user {
            if user.is_active && !user.is_verified {
                let language = user.effective_language(workspace.default_language);
                if let Err(error) = self
                    .verification
                    .issue_code(&user, CodePurpose::EmailVerification, &workspace.name, language)
                    .await
                {
                    warn!(user_id = %user.id, error = %error, "Verification resend suppressed");
                }
            }
        }
        Ok(())
    }

    /// Issue and send a password-reset code. Same no-reveal contract as
    /// `request_email_verification`.
    pub async fn forgot_password(&self, workspace_url: &str, email: &str) -> DomainResult<()> {
        let workspace = self.resolve_workspace(workspace_url).await?;
        let user = self
            .user_repository
            .find_by_email(workspace.id, &normalize_email(email))
            .await?;

        if let Some(user) = user {
            if user.is_active {
                let language = user.effective_language(workspace.default_language);
                if let Err(error) = self
                    .verification
                    .issue_code(&user, CodePurpose::PasswordReset, &workspace.name, language)
                    .await
                {
                    warn!(user_id = %user.id, error = %error, "Password-reset send suppressed");
                }
            }
        }
        Ok(())
    }

    /// Consume a password-reset code and store the new password, then
    /// destroy every session the user holds.
    pub async fn reset_password(
        &self,
        workspace_url: &str,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if !is_acceptable_password(new_password) {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                min: MIN_PASSWORD_LENGTH,
                max: MAX_PASSWORD_LENGTH,
            }
            .into());
        }

        let workspace = self.resolve_workspace(workspace_url).await?;
        let user = self
            .user_repository
            .find_by_email(workspace.id, &normalize_email(email))
            .await?
            .ok_or(DomainError::Auth(AuthError::CodeInvalid))?;

        let new_hash = self.password_hasher.hash(new_password)?;
        self.verification
            .consume_password_reset(user.id, code, &new_hash)
            .await?;

        match self.sessions.destroy_all_for_user(user.id).await {
            Ok(destroyed) => {
                info!(user_id = %user.id, destroyed, "Sessions revoked after password reset");
                Ok(())
            }
            Err(e) => Err(DomainError::Internal {
                message: format!("Session revocation failed: {}", e),
            }),
        }
    }

    /// Resolve an active workspace by its subdomain slug
    pub async fn resolve_workspace(&self, workspace_url: &str) -> DomainResult<Workspace> {
        let workspace_url = normalize_workspace_url(workspace_url);
        self.workspace_repository
            .find_active_by_url(&workspace_url)
            .await?
            .ok_or_else(|| AuthError::WorkspaceNotFound { workspace_url }.into())
    }

    /// Public tenant bootstrap: the workspace plus its subscription's
    /// feature entitlements.
    pub async fn workspace_overview(
        &self,
        workspace_url: &str,
    ) -> DomainResult<(Workspace, Vec<SubscriptionFeature>)> {
        let workspace = self.resolve_workspace(workspace_url).await?;
        let features = self
            .workspace_repository
            .features_for_subscription(workspace.subscription_id)
            .await?;
        Ok((workspace, features))
    }

    /// The caller's profile and active roles
    pub async fn me(&self, user_id: Uuid) -> DomainResult<(User, Vec<UserRole>)> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;
        let roles = self.user_repository.active_roles(user_id).await?;
        Ok((user, roles))
    }

    /// Highest-ranking active role, defaulting to member
    async fn primary_role(&self, user_id: Uuid) -> DomainResult<Role> {
        let roles = self.user_repository.active_roles(user_id).await?;
        Ok(roles
            .iter()
            .map(|r| r.role)
            .min_by_key(|role| match role {
                Role::Owner => 0,
                Role::Admin => 1,
                Role::Member => 2,
            })
            .unwrap_or(Role::Member))
    }

    async fn enforce_login_limits(
        &self,
        workspace_id: Uuid,
        email: &str,
        client_ip: &str,
    ) -> DomainResult<()> {
        let minutes = (self.config.login_limits.window_seconds / 60) as u32;

        let ip_allowed = self
            .rate_limiter
            .check_ip_limit(client_ip)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Rate limiter failure: {}", e),
            })?;
        if !ip_allowed {
            warn!("Login rate limit hit for IP");
            return Err(AuthError::RateLimitExceeded { minutes }.into());
        }

        let account_allowed = self
            .rate_limiter
            .check_account_limit(workspace_id, email)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Rate limiter failure: {}", e),
            })?;
        if !account_allowed {
            warn!(workspace_id = %workspace_id, "Login rate limit hit for account");
            return Err(AuthError::RateLimitExceeded { minutes }.into());
        }

        if let Err(e) = self.rate_limiter.record_ip_attempt(client_ip).await {
            warn!(error = %e, "Failed to record IP login attempt");
        }
        Ok(())
    }

    // IP attempts are recorded up front in enforce_login_limits; only the
    // per-account failure counter reacts to the outcome.
    async fn record_login_failure(&self, workspace_id: Uuid, email: &str) {
        if let Err(e) = self
            .rate_limiter
            .record_account_failure(workspace_id, email)
            .await
        {
            warn!(error = %e, "Failed to record account login failure");
        }
    }
}
