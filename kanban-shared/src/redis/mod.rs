/// Redis integration
///
/// Used as the external key-value backend for cookie sessions.
///
/// ```text
/// login  ──SET session:{sha256(token)} {user_id} EX ttl──> Redis
/// request ──GET session:{sha256(token)}──────────────────> Redis
/// logout ──DEL session:{sha256(token)}───────────────────> Redis
/// ```

pub mod client;

pub use client::{RedisClient, RedisClientError, RedisConfig};
