/// Redis client wrapper
///
/// Wraps `redis::aio::ConnectionManager`, which reconnects on its own, and
/// bounds every command with the configured timeout so a stalled Redis
/// cannot hang a request.
///
/// # Example
///
/// ```no_run
/// use kanban_shared::redis::{RedisClient, RedisConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RedisClient::new(RedisConfig::new("redis://localhost:6379")).await?;
/// client.set_ex("greeting", "hello", 60).await?;
/// assert_eq!(client.get("greeting").await?, Some("hello".to_string()));
/// # Ok(())
/// # }
/// ```

use redis::aio::ConnectionManager;
use redis::{Client, FromRedisValue, RedisError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Redis client errors
#[derive(Error, Debug)]
pub enum RedisClientError {
    /// Connection error
    #[error("Redis connection error: {0}")]
    ConnectionError(String),

    /// Command execution error
    #[error("Redis command error: {0}")]
    CommandError(String),

    /// Command did not answer in time
    #[error("Redis command timed out: {0}")]
    Timeout(String),

    /// Configuration error
    #[error("Redis configuration error: {0}")]
    ConfigError(String),
}

impl From<RedisError> for RedisClientError {
    fn from(err: RedisError) -> Self {
        match err.kind() {
            redis::ErrorKind::IoError => {
                RedisClientError::ConnectionError(format!("IO error: {}", err))
            }
            _ => RedisClientError::CommandError(err.to_string()),
        }
    }
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Connection URL, `redis://[username:password@]host:port[/db]`
    pub url: String,

    /// Per-command timeout in seconds
    pub command_timeout_secs: u64,
}

impl RedisConfig {
    /// Configuration for `url` with a 5 second command timeout
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            command_timeout_secs: 5,
        }
    }
}

/// Cloneable Redis handle
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    config: Arc<RedisConfig>,
}

impl RedisClient {
    /// Connects to Redis
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the server is unreachable.
    pub async fn new(config: RedisConfig) -> Result<Self, RedisClientError> {
        let client = Client::open(config.url.as_str()).map_err(|e| {
            RedisClientError::ConfigError(format!("Invalid Redis URL: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            RedisClientError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        tracing::info!(url = %sanitize_url(&config.url), "Redis client connected");

        Ok(Self {
            manager,
            config: Arc::new(config),
        })
    }

    /// Sends PING and returns true on PONG
    pub async fn ping(&self) -> Result<bool, RedisClientError> {
        let pong: String = self.run(redis::cmd("PING"), "PING").await?;
        Ok(pong == "PONG")
    }

    /// `SET key value EX ttl_secs`
    pub async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), RedisClientError> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("EX").arg(ttl_secs);
        self.run(cmd, "SET").await
    }

    /// `GET key`
    pub async fn get(&self, key: &str) -> Result<Option<String>, RedisClientError> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.run(cmd, "GET").await
    }

    /// `DEL key`, returning whether a key was removed
    pub async fn del(&self, key: &str) -> Result<bool, RedisClientError> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        let removed: i64 = self.run(cmd, "DEL").await?;
        Ok(removed > 0)
    }

    async fn run<T: FromRedisValue>(
        &self,
        cmd: redis::Cmd,
        name: &str,
    ) -> Result<T, RedisClientError> {
        let mut conn = self.manager.clone();

        tokio::time::timeout(
            Duration::from_secs(self.config.command_timeout_secs),
            cmd.query_async::<_, T>(&mut conn),
        )
        .await
        .map_err(|_| RedisClientError::Timeout(name.to_string()))?
        .map_err(RedisClientError::from)
    }
}

/// Masks credentials in a Redis URL for logging
fn sanitize_url(url: &str) -> String {
    if let (Some(at_pos), Some(scheme_end)) = (url.find('@'), url.find("://")) {
        let scheme = &url[..scheme_end + 3];
        let host = &url[at_pos + 1..];
        return format!("{}***:***@{}", scheme, host);
    }
    url.to_string()
}
