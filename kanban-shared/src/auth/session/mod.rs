//! Server-side cookie sessions
//!
//! A session maps an opaque token, carried in the session cookie, to the id
//! of the authenticated user. Backends never see the raw token: it is keyed
//! by its SHA-256 digest, the same scheme used for other bearer secrets.
//!
//! The store is injected into request handlers through application state;
//! pick [`MemorySessionStore`] for a single process or [`RedisSessionStore`]
//! when sessions must survive restarts or be shared between instances.

mod memory;
mod redis_store;

use async_trait::async_trait;
use rand::Rng;
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::redis::RedisClientError;

pub use self::memory::MemorySessionStore;
pub use self::redis_store::RedisSessionStore;

/// Length of a session token
pub const SESSION_TOKEN_LENGTH: usize = 43;

/// Errors raised by session backends
#[derive(Debug, Error)]
pub enum SessionError {
    /// Redis command failed
    #[error("Session backend error: {0}")]
    Redis(#[from] RedisClientError),

    /// Anything else the backend reports
    #[error("Session backend error: {0}")]
    Backend(String),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Pluggable session storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Starts a session for `user_id` and returns the cookie token
    async fn create(&self, user_id: Uuid) -> SessionResult<String>;

    /// Resolves a token to its user, or `None` if unknown or expired
    async fn get(&self, token: &str) -> SessionResult<Option<Uuid>>;

    /// Ends a session; unknown tokens are ignored
    async fn destroy(&self, token: &str) -> SessionResult<()>;

    /// Verifies the backend is reachable
    async fn health_check(&self) -> SessionResult<()>;
}

/// Generates a random alphanumeric session token
pub fn generate_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..SESSION_TOKEN_LENGTH)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// SHA-256 digest of a token as lowercase hex; used as the backend key
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), SESSION_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn test_hash_token_is_stable_hex() {
        let digest = hash_token("abc");
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash_token("abc"), digest);
        assert_ne!(hash_token("abd"), digest);
    }
}
