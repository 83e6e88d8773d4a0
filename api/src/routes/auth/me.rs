//! Current-user endpoint

use actix_web::{web, HttpRequest, HttpResponse};

use ts_core::repositories::{
    CodeRepository, EmailLogRepository, UserRepository, WorkspaceRepository,
};
use ts_core::services::auth::{RateLimiterTrait, SessionStoreTrait};
use ts_core::services::verification::MailerTrait;
use ts_shared::types::ApiEnvelope;

use crate::dto::workspace::MeResponse;
use crate::handlers::error::{error_response, request_language};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// GET /api/v1/auth/me
///
/// Guarded route; the [`AuthContext`] extractor fails with 401 when the
/// auth middleware attached no identity.
pub async fn me<W, U, M, C, E, R, S>(
    state: web::Data<AppState<W, U, M, C, E, R, S>>,
    req: HttpRequest,
    context: AuthContext,
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

    match state.auth.me(context.user_id).await {
        Ok((user, roles)) => {
            HttpResponse::Ok().json(ApiEnvelope::ok("OK", MeResponse::new(&user, &roles)))
        }
        Err(error) => error_response(&error, language),
    }
}
