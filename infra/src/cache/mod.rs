//! Redis-backed session store and rate limiting

pub mod rate_limiter;
pub mod redis_client;
pub mod session_store;

pub use rate_limiter::RedisRateLimiter;
pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;

pub use ts_shared::config::cache::CacheConfig;
