//! Integration tests for the Redis session store and rate limiter
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p ts_infra --test redis_integration -- --ignored

use uuid::Uuid;

use ts_core::services::auth::{RateLimiterTrait, SessionData, SessionStoreTrait};
use ts_infra::cache::{CacheConfig, RedisClient, RedisRateLimiter, RedisSessionStore};
use ts_shared::config::rate_limit::LoginRateLimits;

fn config() -> CacheConfig {
    CacheConfig {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        pool_size: 5,
        default_ttl: 3600,
    }
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(&config()).await;
    assert!(client.is_ok(), "Failed to connect to Redis");
    assert!(client.unwrap().health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_increment_counts_each_call_once() {
    let client = RedisClient::new(&config()).await.unwrap();
    let key = format!("it:counter:{}", Uuid::new_v4());

    assert_eq!(client.increment(&key, Some(60)).await.unwrap(), 1);
    assert_eq!(client.increment(&key, Some(60)).await.unwrap(), 2);
    assert_eq!(client.increment(&key, Some(60)).await.unwrap(), 3);

    client.delete(&key).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_session_round_trip() {
    let client = RedisClient::new(&config()).await.unwrap();
    let store = RedisSessionStore::new(client);

    let data = SessionData {
        user_id: Uuid::new_v4(),
        workspace_id: Uuid::new_v4(),
    };

    let session_id = store.create(&data, 300).await.unwrap();
    assert_eq!(store.get(&session_id).await.unwrap(), Some(data.clone()));

    store.destroy(&session_id).await.unwrap();
    assert_eq!(store.get(&session_id).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_destroy_all_sessions_for_user() {
    let client = RedisClient::new(&config()).await.unwrap();
    let store = RedisSessionStore::new(client);

    let user_id = Uuid::new_v4();
    let data = SessionData {
        user_id,
        workspace_id: Uuid::new_v4(),
    };

    let first = store.create(&data, 300).await.unwrap();
    let second = store.create(&data, 300).await.unwrap();

    let destroyed = store.destroy_all_for_user(user_id).await.unwrap();
    assert_eq!(destroyed, 2);
    assert_eq!(store.get(&first).await.unwrap(), None);
    assert_eq!(store.get(&second).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_login_rate_limiter_counts_failures() {
    let client = RedisClient::new(&config()).await.unwrap();
    let limiter = RedisRateLimiter::new(
        client,
        LoginRateLimits {
            attempts_per_account: 3,
            attempts_per_ip: 100,
            window_seconds: 60,
        },
    );

    let workspace_id = Uuid::new_v4();
    let email = format!("it-{}@example.com", Uuid::new_v4());

    assert!(limiter.check_account_limit(workspace_id, &email).await.unwrap());
    for _ in 0..3 {
        limiter.record_account_failure(workspace_id, &email).await.unwrap();
    }
    assert!(!limiter.check_account_limit(workspace_id, &email).await.unwrap());

    limiter.clear_account_failures(workspace_id, &email).await.unwrap();
    assert!(limiter.check_account_limit(workspace_id, &email).await.unwrap());
}
