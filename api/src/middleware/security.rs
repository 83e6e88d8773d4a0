//! Security middleware
//!
//! Enforces HTTPS in production (directly or behind a trusted proxy via
//! `X-Forwarded-Proto`) and stamps security headers on every response.

use std::env;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

use ts_shared::types::Language;

use crate::handlers::error::ApiError;

/// Security middleware factory
pub struct SecurityHeaders {
    enforce_https: bool,
    trusted_proxies: Vec<String>,
}

impl SecurityHeaders {
    /// Environment-based configuration: HTTPS is enforced in production
    pub fn new() -> Self {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let enforce_https = environment == "production";

        let trusted_proxies = env::var("TRUSTED_PROXIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        log::info!(
            "Security middleware configured: enforce_https={}, trusted_proxies={:?}",
            enforce_https,
            trusted_proxies
        );

        Self {
            enforce_https,
            trusted_proxies,
        }
    }

    /// No HTTPS enforcement, for local development and tests
    pub fn development() -> Self {
        Self {
            enforce_https: false,
            trusted_proxies: vec!["127.0.0.1".to_string(), "::1".to_string()],
        }
    }
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
            trusted_proxies: self.trusted_proxies.clone(),
        }))
    }
}

pub struct SecurityHeadersService<S> {
    service: Rc<S>,
    enforce_https: bool,
    trusted_proxies: Vec<String>,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let enforce_https = self.enforce_https;
        let trusted_proxies = self.trusted_proxies.clone();

        Box::pin(async move {
            if enforce_https && !is_secure_request(&req, &trusted_proxies) {
                log::warn!("Insecure request blocked: {} {}", req.method(), req.path());
                return Err(
                    ApiError::from_catalog("general", "https_required", Language::default()).into(),
                );
            }

            let mut response = service.call(req).await?;
            add_security_headers(&mut response);
            Ok(response)
        })
    }
}

fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    let conn_info = req.connection_info();
    if conn_info.scheme() == "https" {
        return true;
    }

    // Trust X-Forwarded-Proto only from a known proxy
    if let Some(forwarded_proto) = req.headers().get("x-forwarded-proto") {
        if let Ok(proto) = forwarded_proto.to_str() {
            let peer_addr = conn_info.peer_addr().unwrap_or("");
            if proto == "https" && is_trusted_proxy(peer_addr, trusted_proxies) {
                return true;
            }
        }
    }

    false
}

fn is_trusted_proxy(peer_addr: &str, trusted_proxies: &[String]) -> bool {
    let ip = peer_addr.split(':').next().unwrap_or(peer_addr);
    trusted_proxies
        .iter()
        .any(|trusted| trusted == ip || trusted == peer_addr)
}

fn add_security_headers<B>(response: &mut ServiceResponse<B>) {
    let headers = response.headers_mut();

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
}
