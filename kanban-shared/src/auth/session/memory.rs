//! In-process session store.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use tokio::{sync::RwLock, time::Instant};
use uuid::Uuid;

use super::{generate_token, hash_token, SessionResult, SessionStore};

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user_id: Uuid,
    expires_at: Instant,
}

/// Session store backed by a map in process memory.
///
/// Sessions vanish on restart. Expired entries are dropped when read and
/// swept whenever a new session is created.
#[derive(Debug)]
pub struct MemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl MemorySessionStore {
    /// Creates a store whose sessions live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored sessions, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True if no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: Uuid) -> SessionResult<String> {
        let token = generate_token();
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            hash_token(&token),
            SessionEntry {
                user_id,
                expires_at: now + self.ttl,
            },
        );

        Ok(token)
    }

    async fn get(&self, token: &str) -> SessionResult<Option<Uuid>> {
        let key = hash_token(token);

        let entry = self.sessions.read().await.get(&key).copied();
        match entry {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.user_id)),
            Some(_) => {
                self.sessions.write().await.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn destroy(&self, token: &str) -> SessionResult<()> {
        self.sessions.write().await.remove(&hash_token(token));
        Ok(())
    }

    async fn health_check(&self) -> SessionResult<()> {
        Ok(())
    }
}
