//! Redis-backed session store.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::{generate_token, hash_token, SessionError, SessionResult, SessionStore};
use crate::redis::RedisClient;

const KEY_PREFIX: &str = "session:";

/// Session store that keeps sessions in Redis with a TTL.
///
/// Expiry is delegated to Redis, so sessions survive process restarts and
/// can be shared by several API instances.
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
    ttl: Duration,
}

impl RedisSessionStore {
    /// Creates a store whose sessions live for `ttl`.
    pub fn new(client: RedisClient, ttl: Duration) -> Self {
        Self { client, ttl }
    }

    fn key(token: &str) -> String {
        format!("{}{}", KEY_PREFIX, hash_token(token))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user_id: Uuid) -> SessionResult<String> {
        let token = generate_token();
        // Redis rejects EX 0
        let ttl_secs = self.ttl.as_secs().max(1);

        self.client
            .set_ex(&Self::key(&token), &user_id.to_string(), ttl_secs)
            .await?;

        Ok(token)
    }

    async fn get(&self, token: &str) -> SessionResult<Option<Uuid>> {
        let Some(value) = self.client.get(&Self::key(token)).await? else {
            return Ok(None);
        };

        match Uuid::parse_str(&value) {
            Ok(user_id) => Ok(Some(user_id)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding session with malformed user id");
                self.client.del(&Self::key(token)).await?;
                Ok(None)
            }
        }
    }

    async fn destroy(&self, token: &str) -> SessionResult<()> {
        self.client.del(&Self::key(token)).await?;
        Ok(())
    }

    async fn health_check(&self) -> SessionResult<()> {
        if self.client.ping().await? {
            Ok(())
        } else {
            Err(SessionError::Backend("unexpected PING reply".to_string()))
        }
    }
}
