//! Login endpoint

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ts_core::repositories::{
    CodeRepository, EmailLogRepository, UserRepository, WorkspaceRepository,
};
use ts_core::services::auth::{RateLimiterTrait, SessionStoreTrait};
use ts_core::services::verification::MailerTrait;
use ts_shared::types::ApiEnvelope;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{error_response, request_language, validation_response};
use crate::i18n::localized;
use crate::routes::{client_ip, workspace_url_header};
use crate::state::AppState;

/// POST /api/v1/auth/login
///
/// On success the response body carries the JWT access token and the
/// session id travels only in the HttpOnly cookie.
pub async fn login<W, U, M, C, E, R, S>(
    state: web::Data<AppState<W, U, M, C, E, R, S>>,
    req: HttpRequest,
    body: web::Json<LoginRequest>,
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
    let workspace_url = match workspace_url_header(&req, language) {
        Ok(url) => url,
        Err(response) => return response,
    };

    if let Err(errors) = body.validate() {
        return validation_response(&errors, language);
    }

    let ip = client_ip(&req);
    match state
        .auth
        .login(&workspace_url, &body.email, &body.password, &ip)
        .await
    {
        Ok(auth) => {
            let (_, message) = localized("success", "logged_in", language);
            HttpResponse::Ok()
                .cookie(state.session_cookie(&auth.session_id))
                .json(ApiEnvelope::ok(message, LoginResponse::from(&auth)))
        }
        Err(error) => error_response(&error, language),
    }
}
