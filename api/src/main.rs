//! Teamspace API server entry point
//!
//! Wires the production implementations together: MySQL repositories,
//! Redis sessions and rate limiting, the HTTP mail client (or the mock
//! mailer when no API key is configured), and the actix-web app.

use std::io;
use std::sync::Arc;

use actix_web::HttpServer;
use dotenvy::dotenv;
use log::{info, warn};

use ts_api::middleware::ApiRateLimit;
use ts_api::{create_app, AppState};
use ts_core::services::auth::{AuthService, AuthServiceConfig, SessionStoreTrait};
use ts_core::services::password::PasswordHasher;
use ts_core::services::token::{TokenService, TokenServiceConfig};
use ts_core::services::verification::{MailerTrait, VerificationConfig, VerificationService};
use ts_infra::database::mysql::{
    MySqlCodeRepository, MySqlEmailLogRepository, MySqlUserRepository, MySqlWorkspaceRepository,
};
use ts_infra::{DatabasePool, HttpMailer, MockMailer, RedisClient, RedisRateLimiter, RedisSessionStore};
use ts_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    info!(
        "Starting Teamspace API ({:?}) on {}",
        config.environment,
        config.server.bind_address()
    );

    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the insecure default");
    }

    if config.mail.is_configured() {
        let mailer = HttpMailer::new(config.mail.clone()).map_err(io::Error::other)?;
        run(config, mailer).await
    } else {
        warn!("Mail API key not configured; outbound email goes to the mock mailer");
        run(config, MockMailer::new()).await
    }
}

async fn run<M: MailerTrait + 'static>(config: AppConfig, mailer: M) -> io::Result<()> {
    let pool = DatabasePool::new(&config.database)
        .await
        .map_err(io::Error::other)?;
    pool.health_check().await.map_err(io::Error::other)?;
    pool.run_migrations().await.map_err(io::Error::other)?;
    info!("Connected to MySQL");

    let redis = RedisClient::new(&config.cache)
        .await
        .map_err(io::Error::other)?;
    info!("Connected to Redis");

    let workspaces = Arc::new(MySqlWorkspaceRepository::new(pool.inner().clone()));
    let users = Arc::new(MySqlUserRepository::new(pool.inner().clone()));
    let codes = Arc::new(MySqlCodeRepository::new(pool.inner().clone()));
    let email_log = Arc::new(MySqlEmailLogRepository::new(pool.inner().clone()));

    let verification = VerificationService::with_config(
        Arc::new(mailer),
        codes,
        email_log,
        VerificationConfig::from(&config.rate_limit.email),
    );
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let password_hasher = PasswordHasher::new(config.auth.bcrypt_cost);
    let rate_limiter = Arc::new(RedisRateLimiter::new(
        redis.clone(),
        config.rate_limit.login.clone(),
    ));
    let sessions = Arc::new(RedisSessionStore::new(redis));

    let auth = Arc::new(AuthService::new(
        workspaces,
        users,
        verification,
        token_service.clone(),
        password_hasher,
        rate_limiter,
        sessions.clone(),
        AuthServiceConfig {
            session_ttl_seconds: config.auth.session.timeout,
            login_limits: config.rate_limit.login.clone(),
        },
    ));

    let api_rate_limit = if config.rate_limit.enabled {
        ApiRateLimit::new(&config.cache.url, config.rate_limit.api.clone())
            .map_err(io::Error::other)?
    } else {
        warn!("API rate limiting is disabled");
        ApiRateLimit::disabled()
    };

    let session_config = config.auth.session.clone();
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;

    let state = actix_web::web::Data::new(AppState::new(auth, session_config));
    let dyn_sessions: Arc<dyn SessionStoreTrait> = sessions;

    let mut server = HttpServer::new(move || {
        create_app(
            state.clone(),
            token_service.clone(),
            dyn_sessions.clone(),
            api_rate_limit.clone(),
        )
    })
    .bind(&bind_address)?;

    if workers > 0 {
        server = server.workers(workers);
    }

    info!("Listening on {}", bind_address);
    server.run().await
}
