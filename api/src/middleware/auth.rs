//! Authentication middleware
//!
//! Guards routes that require a signed-in caller. Two credentials are
//! accepted, checked in order:
//!
//! 1. `Authorization: Bearer <jwt>` - verified locally against the HS256
//!    signature, no store round trip.
//! 2. The session cookie - resolved against the Redis session store, so
//!    revocation (logout, password reset) takes effect immediately.
//!
//! On success an [`AuthContext`] is attached to the request; handlers pull
//! it out with the `FromRequest` extractor.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures_util::future::LocalBoxFuture;

use ts_core::services::auth::SessionStoreTrait;
use ts_core::services::token::TokenService;
use ts_shared::types::Language;

use crate::handlers::error::{request_language, ApiError};

/// Identity of the authenticated caller, attached to guarded requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: uuid::Uuid,
    pub workspace_id: uuid::Uuid,
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = req.extensions().get::<AuthContext>().cloned();
        ready(context.ok_or_else(|| {
            ApiError::from_catalog("auth", "unauthorized", request_language(req)).into()
        }))
    }
}

/// Authentication middleware factory
pub struct AuthGuard {
    token_service: Arc<TokenService>,
    sessions: Arc<dyn SessionStoreTrait>,
    cookie_name: String,
}

impl AuthGuard {
    pub fn new(
        token_service: Arc<TokenService>,
        sessions: Arc<dyn SessionStoreTrait>,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            token_service,
            sessions,
            cookie_name: cookie_name.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardService {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
            sessions: self.sessions.clone(),
            cookie_name: self.cookie_name.clone(),
        }))
    }
}

pub struct AuthGuardService<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
    sessions: Arc<dyn SessionStoreTrait>,
    cookie_name: String,
}

impl<S, B> Service<ServiceRequest> for AuthGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = self.token_service.clone();
        let sessions = self.sessions.clone();
        let cookie_name = self.cookie_name.clone();

        Box::pin(async move {
            let language = service_request_language(&req);

            if let Some(token) = extract_bearer_token(&req) {
                let claims = token_service
                    .verify_access_token(&token)
                    .map_err(|e| ApiError::from_domain(&e, language))?;
                let context = AuthContext {
                    user_id: claims
                        .user_id()
                        .map_err(|e| ApiError::from_domain(&e, language))?,
                    workspace_id: claims
                        .workspace_uuid()
                        .map_err(|e| ApiError::from_domain(&e, language))?,
                };
                req.extensions_mut().insert(context);
                return service.call(req).await.map(|res| res.map_into_left_body());
            }

            let session_id = req.cookie(&cookie_name).map(|c| c.value().to_string());
            let session_id = match session_id {
                Some(id) => id,
                None => {
                    let err = ApiError::from_catalog("auth", "unauthorized", language);
                    return Ok(req.into_response(err.error_response()).map_into_right_body());
                }
            };

            match sessions.get(&session_id).await {
                Ok(Some(session)) => {
                    req.extensions_mut().insert(AuthContext {
                        user_id: session.user_id,
                        workspace_id: session.workspace_id,
                    });
                    service.call(req).await.map(|res| res.map_into_left_body())
                }
                Ok(None) => {
                    let err = ApiError::from_catalog("auth", "session_expired", language);
                    Ok(req.into_response(err.error_response()).map_into_right_body())
                }
                Err(e) => {
                    log::error!("Session lookup failed: {}", e);
                    let err = ApiError::from_catalog("general", "internal_error", language);
                    Ok(req.into_response(err.error_response()).map_into_right_body())
                }
            }
        })
    }
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn service_request_language(req: &ServiceRequest) -> Language {
    req.headers()
        .get(actix_web::http::header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}
