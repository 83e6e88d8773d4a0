//! Redis-backed implementation of the session store.
//!
//! Each session lives under `session:{id}` with the session TTL. A per-user
//! set `user_sessions:{user_id}` indexes the live session ids so a password
//! reset can revoke every session at once.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;
use uuid::Uuid;

use ts_core::services::auth::{SessionData, SessionStoreTrait};

use super::redis_client::RedisClient;

const SESSION_PREFIX: &str = "session:";
const USER_INDEX_PREFIX: &str = "user_sessions:";

/// Redis implementation of SessionStoreTrait
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn session_key(session_id: &str) -> String {
        format!("{}{}", SESSION_PREFIX, session_id)
    }

    fn index_key(user_id: Uuid) -> String {
        format!("{}{}", USER_INDEX_PREFIX, user_id)
    }
}

#[async_trait]
impl SessionStoreTrait for RedisSessionStore {
    async fn create(&self, data: &SessionData, ttl_seconds: u64) -> Result<String, String> {
        let session_id = Uuid::new_v4().to_string();
        let payload = serde_json::to_string(data).map_err(|e| e.to_string())?;

        self.client
            .set_with_expiry(&Self::session_key(&session_id), &payload, ttl_seconds)
            .await
            .map_err(|e| e.to_string())?;

        // Index entries outlive each session by at most the session TTL
        let mut conn = self.client.conn();
        let index = Self::index_key(data.user_id);
        conn.sadd::<_, _, ()>(&index, &session_id)
            .await
            .map_err(|e| e.to_string())?;
        conn.expire::<_, ()>(&index, ttl_seconds as i64)
            .await
            .map_err(|e| e.to_string())?;

        debug!(user_id = %data.user_id, "Session created");
        Ok(session_id)
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, String> {
        let payload = self
            .client
            .get(&Self::session_key(session_id))
            .await
            .map_err(|e| e.to_string())?;

        match payload {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| e.to_string()),
            None => Ok(None),
        }
    }

    async fn destroy(&self, session_id: &str) -> Result<(), String> {
        // Look the session up first so the user index stays consistent
        if let Some(data) = self.get(session_id).await? {
            let mut conn = self.client.conn();
            conn.srem::<_, _, ()>(&Self::index_key(data.user_id), session_id)
                .await
                .map_err(|e| e.to_string())?;
        }

        self.client
            .delete(&Self::session_key(session_id))
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    async fn destroy_all_for_user(&self, user_id: Uuid) -> Result<u64, String> {
        let mut conn = self.client.conn();
        let index = Self::index_key(user_id);
        let session_ids: Vec<String> = conn
            .smembers(&index)
            .await
            .map_err(|e| e.to_string())?;

        let mut destroyed = 0u64;
        for session_id in &session_ids {
            if self
                .client
                .delete(&Self::session_key(session_id))
                .await
                .map_err(|e| e.to_string())?
            {
                destroyed += 1;
            }
        }
        conn.del::<_, ()>(&index).await.map_err(|e| e.to_string())?;

        debug!(user_id = %user_id, destroyed, "Sessions destroyed for user");
        Ok(destroyed)
    }
}
