//! Shared application state
//!
//! The auth service is generic over its repositories and collaborating
//! services so the HTTP layer can be exercised against in-memory mocks.
//! Handlers receive the state through `web::Data`.

use std::sync::Arc;

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use ts_core::repositories::{
    CodeRepository, EmailLogRepository, UserRepository, WorkspaceRepository,
};
use ts_core::services::auth::{AuthService, RateLimiterTrait, SessionStoreTrait};
use ts_core::services::verification::MailerTrait;
use ts_shared::config::SessionConfig;

pub struct AppState<W, U, M, C, E, R, S>
where
    W: WorkspaceRepository,
    U: UserRepository,
    M: MailerTrait,
    C: CodeRepository,
    E: EmailLogRepository,
    R: RateLimiterTrait,
    S: SessionStoreTrait,
{
    pub auth: Arc<AuthService<W, U, M, C, E, R, S>>,
    pub session_config: SessionConfig,
}

impl<W, U, M, C, E, R, S> AppState<W, U, M, C, E, R, S>
where
    W: WorkspaceRepository,
    U: UserRepository,
    M: MailerTrait,
    C: CodeRepository,
    E: EmailLogRepository,
    R: RateLimiterTrait,
    S: SessionStoreTrait,
{
    pub fn new(auth: Arc<AuthService<W, U, M, C, E, R, S>>, session_config: SessionConfig) -> Self {
        Self {
            auth,
            session_config,
        }
    }

    /// Session cookie carrying the opaque session id
    pub fn session_cookie(&self, session_id: &str) -> Cookie<'static> {
        Cookie::build(self.session_config.cookie_name.clone(), session_id.to_string())
            .path("/")
            .http_only(self.session_config.http_only)
            .secure(self.session_config.secure)
            .same_site(same_site(&self.session_config.same_site))
            .max_age(Duration::seconds(self.session_config.timeout as i64))
            .finish()
    }

    /// Expired session cookie, for logout and revocation
    pub fn clearing_cookie(&self) -> Cookie<'static> {
        Cookie::build(self.session_config.cookie_name.clone(), "")
            .path("/")
            .http_only(self.session_config.http_only)
            .secure(self.session_config.secure)
            .same_site(same_site(&self.session_config.same_site))
            .max_age(Duration::ZERO)
            .finish()
    }
}

fn same_site(value: &str) -> SameSite {
    match value.to_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}
