//! Logout endpoint

use actix_web::{web, HttpRequest, HttpResponse};

use ts_core::repositories::{
    CodeRepository, EmailLogRepository, UserRepository, WorkspaceRepository,
};
use ts_core::services::auth::{RateLimiterTrait, SessionStoreTrait};
use ts_core::services::verification::MailerTrait;
use ts_shared::types::ApiEnvelope;

use crate::handlers::error::request_language;
use crate::i18n::localized;
use crate::state::AppState;

/// POST /api/v1/auth/logout
///
/// Destroys the session named by the cookie and clears the cookie.
/// Idempotent: a missing or already-dead session still signs the
/// caller out, so the response is 200 either way.
pub async fn logout<W, U, M, C, E, R, S>(
    state: web::Data<AppState<W, U, M, C, E, R, S>>,
    req: HttpRequest,
) -> HttpResponse
where
    W: WorkspaceRepository + 'static,
    U: UserRepository + 'static,
    M: MailerTrait + 'static,
    C: CodeRepository + 'static,
    E: EmailLogRepository + 'static,
    R: RateLimiterTrait + 'static,
    S: SessionStoreTrait + 'static,
{
    let language = request_language(&req);

    if let Some(cookie) = req.cookie(&state.session_config.cookie_name) {
        if let Err(error) = state.auth.logout(cookie.value()).await {
            // Still clear the cookie; the session will expire on its own
            log::error!("Logout failed to destroy session: {}", error);
        }
    }

    let (_, message) = localized("success", "logged_out", language);
    HttpResponse::Ok()
        .cookie(state.clearing_cookie())
        .json(ApiEnvelope::<serde_json::Value>::ok_empty(message))
}
