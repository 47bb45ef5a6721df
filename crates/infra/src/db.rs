//! Postgres connection bootstrap.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

const MAX_ATTEMPTS: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Connection settings for the booking database.
#[derive(Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "innsecure".to_string(),
            max_connections: 5,
        }
    }
}

// Keeps the password out of logs.
impl core::fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

impl DbSettings {
    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Open a connection pool, retrying a few times while the database comes up.
pub async fn connect_postgres(settings: &DbSettings) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 1;
    loop {
        let result = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(settings.connect_options())
            .await;

        match result {
            Ok(pool) => {
                tracing::info!(host = %settings.host, database = %settings.database, "connected to postgres");
                return Ok(pool);
            }
            Err(e) if attempt < MAX_ATTEMPTS => {
                tracing::warn!(attempt, error = %e, settings = ?settings, "postgres connection failed; retrying");
                attempt += 1;
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(e) => {
                tracing::error!(attempts = attempt, error = %e, settings = ?settings, "giving up on postgres");
                return Err(e);
            }
        }
    }
}
