//! Process configuration, read from environment variables.
//!
//! | variable             | default         |
//! |----------------------|-----------------|
//! | `HTTP_ADDR`          | `0.0.0.0:8080`  |
//! | `JWT_SECRET`         | `dev-secret`    |
//! | `REQUEST_TIMEOUT_MS` | unset (none)    |
//! | `STORE`              | `memory`        |
//! | `DB_HOST`            | `localhost`     |
//! | `DB_PORT`            | `5432`          |
//! | `DB_USER`            | `postgres`      |
//! | `DB_PASSWORD`        | empty           |
//! | `DB_NAME`            | `innsecure`     |
//! | `LOG_FORMAT`         | `json`          |

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use hotelbook_infra::DbSettings;
use hotelbook_observability::LogFormat;

/// Signing secret used when `JWT_SECRET` is not set. Local development only.
pub const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Where bookings live.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoreConfig {
    #[default]
    InMemory,
    Postgres(DbSettings),
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub http_addr: SocketAddr,
    pub jwt_secret: String,
    /// Per-request deadline. `None` means requests run until done or shutdown.
    pub request_timeout: Option<Duration>,
    pub store: StoreConfig,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            request_timeout: None,
            store: StoreConfig::InMemory,
            log_format: LogFormat::Json,
        }
    }
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("http_addr", &self.http_addr)
            .field("jwt_secret", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("store", &self.store)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let http_addr = match get("HTTP_ADDR") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("HTTP_ADDR", &raw, e))?,
            None => defaults.http_addr,
        };

        let jwt_secret = get("JWT_SECRET").unwrap_or(defaults.jwt_secret);

        let request_timeout = match get("REQUEST_TIMEOUT_MS") {
            Some(raw) => {
                let ms: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::invalid("REQUEST_TIMEOUT_MS", &raw, e))?;
                (ms > 0).then(|| Duration::from_millis(ms))
            }
            None => None,
        };

        let store = match get("STORE").as_deref().map(str::trim) {
            None | Some("memory") => StoreConfig::InMemory,
            Some("postgres") => StoreConfig::Postgres(db_settings(&get)?),
            Some(other) => {
                return Err(ConfigError::invalid(
                    "STORE",
                    other,
                    "expected 'memory' or 'postgres'",
                ));
            }
        };

        let log_format = match get("LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid("LOG_FORMAT", &raw, e))?,
            None => defaults.log_format,
        };

        Ok(Self {
            http_addr,
            jwt_secret,
            request_timeout,
            store,
            log_format,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn db_settings(get: &impl Fn(&str) -> Option<String>) -> Result<DbSettings, ConfigError> {
    let mut db = DbSettings::default();

    if let Some(host) = get("DB_HOST") {
        db.host = host;
    }
    if let Some(raw) = get("DB_PORT") {
        db.port = raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::invalid("DB_PORT", &raw, e))?;
    }
    if let Some(user) = get("DB_USER") {
        db.user = user;
    }
    if let Some(password) = get("DB_PASSWORD") {
        db.password = password;
    }
    if let Some(name) = get("DB_NAME") {
        db.database = name;
    }

    Ok(db)
}
