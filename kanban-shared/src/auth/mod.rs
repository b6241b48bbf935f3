/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Cookie session tokens and the pluggable session store
///
/// # Example
///
/// ```no_run
/// use kanban_shared::auth::password::{hash_password, verify_password};
/// use kanban_shared::auth::session::{MemorySessionStore, SessionStore};
/// use std::time::Duration;
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let sessions = MemorySessionStore::new(Duration::from_secs(3600));
/// let token = sessions.create(Uuid::new_v4()).await?;
/// assert!(sessions.get(&token).await?.is_some());
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod session;
