//! Per-IP API rate limiting
//!
//! A fixed-window counter in Redis, keyed `rate_limit:api:{ip}`, shared by
//! every server instance. Redis being unreachable fails open: a degraded
//! limiter must not take the API down with it.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use redis::{AsyncCommands, Client};

use ts_shared::config::rate_limit::ApiRateLimits;
use ts_shared::types::Language;

use crate::handlers::error::ApiError;

/// Rate limit middleware factory.
///
/// Built without a Redis client (`disabled`) it passes every request
/// through, which keeps the app composition uniform in tests.
#[derive(Clone)]
pub struct ApiRateLimit {
    redis_client: Option<Arc<Client>>,
    limits: ApiRateLimits,
}

impl ApiRateLimit {
    pub fn new(redis_url: &str, limits: ApiRateLimits) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;
        Ok(Self {
            redis_client: Some(Arc::new(client)),
            limits,
        })
    }

    pub fn disabled() -> Self {
        Self {
            redis_client: None,
            limits: ApiRateLimits::default(),
        }
    }
}

#[derive(Debug)]
enum LimitStatus {
    Allowed,
    Exceeded { retry_after_seconds: u64 },
}

async fn check_ip_limit(
    client: &Client,
    ip: &str,
    limit: u32,
) -> Result<LimitStatus, redis::RedisError> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let key = format!("rate_limit:api:{}", ip);

    let count: Option<u32> = conn.get(&key).await?;
    match count {
        Some(current) if current >= limit => {
            let ttl: i64 = conn.ttl(&key).await?;
            Ok(LimitStatus::Exceeded {
                retry_after_seconds: ttl.max(0) as u64,
            })
        }
        Some(_) => {
            let _: u32 = conn.incr(&key, 1).await?;
            Ok(LimitStatus::Allowed)
        }
        None => {
            // First request in this window
            let _: () = conn.set_ex(&key, 1u32, 60).await?;
            Ok(LimitStatus::Allowed)
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiRateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiRateLimitService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiRateLimitService {
            service: Rc::new(service),
            redis_client: self.redis_client.clone(),
            limits: self.limits.clone(),
        }))
    }
}

pub struct ApiRateLimitService<S> {
    service: Rc<S>,
    redis_client: Option<Arc<Client>>,
    limits: ApiRateLimits,
}

impl<S, B> Service<ServiceRequest> for ApiRateLimitService<S>
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
        let redis_client = self.redis_client.clone();
        let limit = self.limits.per_ip_per_minute;

        Box::pin(async move {
            let redis_client = match redis_client {
                Some(client) => client,
                None => return service.call(req).await,
            };

            let ip = req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("unknown")
                .to_string();

            match check_ip_limit(&redis_client, &ip, limit).await {
                Ok(LimitStatus::Allowed) => service.call(req).await,
                Ok(LimitStatus::Exceeded {
                    retry_after_seconds,
                }) => {
                    log::warn!("API rate limit exceeded for {}", ip);
                    let language = req
                        .headers()
                        .get(actix_web::http::header::ACCEPT_LANGUAGE)
                        .and_then(|value| value.to_str().ok())
                        .map(Language::from_accept_language)
                        .unwrap_or_default();
                    let minutes = (retry_after_seconds.max(1)).div_ceil(60);
                    let error = ApiError::from_catalog("auth", "rate_limit_exceeded", language)
                        .with_message_substitution("{minutes}", &minutes.to_string())
                        .with_retry_after(retry_after_seconds.max(1));
                    Err(error.into())
                }
                Err(e) => {
                    // Fail open
                    log::error!("Rate limit check failed, allowing request: {}", e);
                    service.call(req).await
                }
            }
        })
    }
}
