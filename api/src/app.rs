//! Application composition
//!
//! `create_app` assembles the route table and middleware stack around a
//! prepared [`AppState`]. The function is generic over the repository and
//! service traits so integration tests can run the real HTTP surface
//! against in-memory mocks.

use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpRequest, HttpResponse};

use ts_core::repositories::{
    CodeRepository, EmailLogRepository, UserRepository, WorkspaceRepository,
};
use ts_core::services::auth::{RateLimiterTrait, SessionStoreTrait};
use ts_core::services::token::TokenService;
use ts_core::services::verification::MailerTrait;

use crate::handlers::error::{envelope_response, request_language};
use crate::i18n::localized;
use crate::middleware::{create_cors, ApiRateLimit, AuthGuard, SecurityHeaders};
use crate::routes::auth::{
    forgot_password, login, logout, me, register, resend_verification, reset_password,
    verify_email,
};
use crate::routes::health::health_check;
use crate::routes::workspace::get_workspace;
use crate::state::AppState;

/// Build the actix application around the prepared state.
///
/// Middleware order (outermost first): logging, CORS, security headers,
/// then the per-IP rate limit on the `/api/v1` scope. `/auth/me` is the
/// only guarded route; everything else on the auth scope is reachable
/// before sign-in by design.
pub fn create_app<W, U, M, C, E, R, S>(
    app_state: web::Data<AppState<W, U, M, C, E, R, S>>,
    token_service: Arc<TokenService>,
    sessions: Arc<dyn SessionStoreTrait>,
    rate_limit: ApiRateLimit,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    W: WorkspaceRepository + 'static,
    U: UserRepository + 'static,
    M: MailerTrait + 'static,
    C: CodeRepository + 'static,
    E: EmailLogRepository + 'static,
    R: RateLimiterTrait + 'static,
    S: SessionStoreTrait + 'static,
{
    let cookie_name = app_state.session_config.cookie_name.clone();
    let auth_guard = AuthGuard::new(token_service, sessions, cookie_name);

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(create_cors())
        .wrap(SecurityHeaders::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .wrap(rate_limit)
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<W, U, M, C, E, R, S>))
                        .route("/login", web::post().to(login::<W, U, M, C, E, R, S>))
                        .route("/logout", web::post().to(logout::<W, U, M, C, E, R, S>))
                        .route(
                            "/verify-email",
                            web::post().to(verify_email::<W, U, M, C, E, R, S>),
                        )
                        .route(
                            "/resend-verification",
                            web::post().to(resend_verification::<W, U, M, C, E, R, S>),
                        )
                        .route(
                            "/forgot-password",
                            web::post().to(forgot_password::<W, U, M, C, E, R, S>),
                        )
                        .route(
                            "/reset-password",
                            web::post().to(reset_password::<W, U, M, C, E, R, S>),
                        )
                        .service(
                            web::resource("/me")
                                .wrap(auth_guard)
                                .route(web::get().to(me::<W, U, M, C, E, R, S>)),
                        ),
                )
                .route(
                    "/workspace",
                    web::get().to(get_workspace::<W, U, M, C, E, R, S>),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    let (status, message) = localized("general", "not_found", request_language(&req));
    envelope_response(status, message)
}
