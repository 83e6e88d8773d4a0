//! Public workspace endpoint
//!
//! Unauthenticated tenant bootstrap: the front-end resolves its subdomain
//! to the workspace identity, branding, and subscription entitlements
//! before showing the sign-in screen.

use actix_web::{web, HttpRequest, HttpResponse};

use ts_core::repositories::{
    CodeRepository, EmailLogRepository, UserRepository, WorkspaceRepository,
};
use ts_core::services::auth::{RateLimiterTrait, SessionStoreTrait};
use ts_core::services::verification::MailerTrait;
use ts_shared::types::ApiEnvelope;

use crate::dto::workspace::WorkspaceOverviewResponse;
use crate::handlers::error::{error_response, request_language};
use crate::routes::workspace_url_header;
use crate::state::AppState;

/// GET /api/v1/workspace
pub async fn get_workspace<W, U, M, C, E, R, S>(
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
    let workspace_url = match workspace_url_header(&req, language) {
        Ok(url) => url,
        Err(response) => return response,
    };

    match state.auth.workspace_overview(&workspace_url).await {
        Ok((workspace, features)) => HttpResponse::Ok().json(ApiEnvelope::ok(
            "OK",
            WorkspaceOverviewResponse::new(&workspace, &features),
        )),
        Err(error) => error_response(&error, language),
    }
}
