/// Configuration management for the API server
///
/// Configuration is read from environment variables (with `.env` support
/// for development) into a typed struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 5000)
/// - `CORS_ORIGINS`: Comma separated allowed origins (default: http://localhost:3000)
/// - `PRODUCTION`: Enables HSTS (default: false)
/// - `ENFORCE_BOARD_OWNERSHIP`: Restrict board and task access to the owner (default: true)
/// - `STORE_BACKEND`: `postgres` or `memory` (default: postgres)
/// - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `SESSION_BACKEND`: `memory` or `redis` (default: memory)
/// - `SESSION_TTL_SECS`: Session lifetime (default: 86400)
/// - `SESSION_COOKIE_NAME`: Cookie name (default: kanban.sid)
/// - `SESSION_COOKIE_SECURE`: Sets the `Secure` cookie attribute (default: false)
/// - `REDIS_URL`: Redis connection string (required for redis sessions)
///
/// # Example
///
/// ```no_run
/// use kanban_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub api: ApiConfig,

    /// Persistence configuration
    pub store: StoreConfig,

    /// Session configuration
    pub session: SessionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Origins allowed to make credentialed requests; `*` is permissive
    pub cors_origins: Vec<String>,

    /// Production mode (HSTS on)
    pub production: bool,

    /// Only the owner may read a board or touch its tasks
    pub enforce_board_ownership: bool,
}

/// Which store implementation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => anyhow::bail!("unknown STORE_BACKEND '{}', expected postgres or memory", other),
        }
    }
}

/// Persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Selected backend
    pub backend: StoreBackend,

    /// PostgreSQL connection URL
    pub database_url: Option<String>,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Which session store to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    Memory,
    Redis,
}

impl FromStr for SessionBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(SessionBackend::Memory),
            "redis" => Ok(SessionBackend::Redis),
            other => anyhow::bail!("unknown SESSION_BACKEND '{}', expected memory or redis", other),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Selected backend
    pub backend: SessionBackend,

    /// Session lifetime in seconds
    pub ttl_secs: u64,

    /// Name of the session cookie
    pub cookie_name: String,

    /// Whether the cookie is marked `Secure`
    pub cookie_secure: bool,

    /// Redis connection URL
    pub redis_url: Option<String>,
}

impl SessionConfig {
    /// Session lifetime
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for Config {
    /// Local development defaults: in-memory store and sessions
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                cors_origins: vec!["http://localhost:3000".to_string()],
                production: false,
                enforce_board_ownership: true,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                database_url: None,
                max_connections: 10,
            },
            session: SessionConfig {
                backend: SessionBackend::Memory,
                ttl_secs: 86_400,
                cookie_name: "kanban.sid".to_string(),
                cookie_secure: false,
                redis_url: None,
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed, or if the selected
    /// backend is missing its connection URL.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_or("API_PORT", "5000").parse::<u16>()?;
        let cors_origins = parse_list(&env_or("CORS_ORIGINS", "http://localhost:3000"));
        let production = parse_bool("PRODUCTION", &env_or("PRODUCTION", "false"))?;
        let enforce_board_ownership = parse_bool(
            "ENFORCE_BOARD_OWNERSHIP",
            &env_or("ENFORCE_BOARD_OWNERSHIP", "true"),
        )?;

        let store_backend = env_or("STORE_BACKEND", "postgres").parse::<StoreBackend>()?;
        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL environment variable is required for the postgres store");
        }
        let max_connections = env_or("DATABASE_MAX_CONNECTIONS", "10").parse::<u32>()?;

        let session_backend = env_or("SESSION_BACKEND", "memory").parse::<SessionBackend>()?;
        let redis_url = env::var("REDIS_URL").ok();
        if session_backend == SessionBackend::Redis && redis_url.is_none() {
            anyhow::bail!("REDIS_URL environment variable is required for redis sessions");
        }
        let ttl_secs = env_or("SESSION_TTL_SECS", "86400").parse::<u64>()?;
        if ttl_secs == 0 {
            anyhow::bail!("SESSION_TTL_SECS must be greater than zero");
        }
        let cookie_name = env_or("SESSION_COOKIE_NAME", "kanban.sid");
        let cookie_secure = parse_bool(
            "SESSION_COOKIE_SECURE",
            &env_or("SESSION_COOKIE_SECURE", "false"),
        )?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
                enforce_board_ownership,
            },
            store: StoreConfig {
                backend: store_backend,
                database_url,
                max_connections,
            },
            session: SessionConfig {
                backend: session_backend,
                ttl_secs,
                cookie_name,
                cookie_secure,
                redis_url,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got '{}'", key, other),
    }
}
