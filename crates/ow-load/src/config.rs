//! Connection settings for the sink.

use std::fmt;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

use crate::error::{LoadError, Result};
use crate::sql::validate_identifier;

/// Schema the warehouse tables live in unless configured otherwise.
pub const DEFAULT_SCHEMA: &str = "analytics";

/// Postgres connection and pool settings.
#[derive(Clone)]
pub struct PgConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Target schema, created on load if missing.
    pub schema: String,
    pub max_connections: u32,
    /// Extra connection attempts after the first failure.
    pub connect_retries: u32,
    /// Base delay between attempts; attempt `n` waits `n * retry_backoff`.
    pub retry_backoff: Duration,
    pub acquire_timeout: Duration,
}

impl PgConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            user: user.into(),
            password: password.into(),
            schema: DEFAULT_SCHEMA.to_string(),
            max_connections: 2,
            connect_retries: 3,
            retry_backoff: Duration::from_secs(1),
            acquire_timeout: Duration::from_secs(10),
        }
    }

    /// `host:port/database`, safe to log.
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }

    /// Reject settings that cannot work before touching the network.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(LoadError::InvalidConfig {
                message: "host is empty".to_string(),
            });
        }
        if self.database.trim().is_empty() {
            return Err(LoadError::InvalidConfig {
                message: "database name is empty".to_string(),
            });
        }
        if self.max_connections == 0 {
            return Err(LoadError::InvalidConfig {
                message: "max_connections must be > 0".to_string(),
            });
        }
        validate_identifier(&self.schema)
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

impl fmt::Debug for PgConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("schema", &self.schema)
            .field("max_connections", &self.max_connections)
            .field("connect_retries", &self.connect_retries)
            .field("retry_backoff", &self.retry_backoff)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}
