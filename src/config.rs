//! Gateway configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Every key has a default; values that fail to parse, and
//! zero pool sizes, timeouts or queue capacities, fall back to their
//! default, except `LISTEN_ADDR` and `STORE_BACKEND`, which are
//! rejected.

use std::fmt;
use std::net::{AddrParseError, SocketAddr};

use sqlx::postgres::PgConnectOptions;

/// Configuration errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is set but is not a socket address.
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    InvalidListenAddr {
        /// Raw value read from the environment.
        value: String,
        /// Parser error.
        source: AddrParseError,
    },

    /// `STORE_BACKEND` names an unknown backend.
    #[error("unknown STORE_BACKEND {0:?}; expected \"postgres\" or \"memory\"")]
    UnknownStoreBackend(String),
}

/// Which [`crate::persistence::StudentStore`] implementation to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL through a shared connection pool.
    Postgres,
    /// Volatile in-process table.
    Memory,
}

/// Log output format for `tracing-subscriber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Store connection settings.
///
/// When `url` is set it wins over the individual fields.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection string (`DATABASE_URL`).
    pub url: Option<String>,
    /// Store host (`DB_HOST`).
    pub host: String,
    /// Store port (`DB_PORT`).
    pub port: u16,
    /// Store user (`DB_USER`).
    pub user: String,
    /// Store password (`DB_PASSWORD`).
    pub password: String,
    /// Database name (`DB_NAME`).
    pub name: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// Seconds to wait when acquiring a pooled connection.
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Returns the driver options for this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`sqlx::Error::Configuration`] if `url` cannot be parsed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name))
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP and WebSocket server to.
    pub listen_addr: SocketAddr,

    /// Selected store implementation.
    pub store_backend: StoreBackend,

    /// Store connection settings (ignored by the memory backend).
    pub database: DatabaseConfig,

    /// Return raw store error messages in 500 responses.
    pub expose_store_errors: bool,

    /// Pending-message capacity of each listener's outbound queue.
    pub listener_queue_capacity: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl GatewayConfig {
    /// Loads configuration from environment variables, after optionally
    /// loading a `.env` file.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `LISTEN_ADDR` is set but cannot be parsed
    /// or `STORE_BACKEND` is unknown.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_bool = |key: &str, default: bool| match lookup(key).as_deref() {
            Some("true") | Some("TRUE") | Some("1") => true,
            Some("false") | Some("FALSE") | Some("0") => false,
            _ => default,
        };

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidListenAddr { value, source })?,
            None => {
                let port: u16 = parse_value(lookup("PORT")).unwrap_or(3000);
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownStoreBackend(other.to_string())),
        };

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
            host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_value(lookup("DB_PORT")).unwrap_or(5432),
            user: lookup("DB_USER").unwrap_or_else(|| "root".to_string()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: lookup("DB_NAME").unwrap_or_else(|| "school_gatekeeper".to_string()),
            max_connections: parse_value(lookup("DATABASE_MAX_CONNECTIONS"))
                .filter(|&n| n > 0)
                .unwrap_or(10),
            min_connections: parse_value(lookup("DATABASE_MIN_CONNECTIONS")).unwrap_or(0),
            connect_timeout_secs: parse_value(lookup("DATABASE_CONNECT_TIMEOUT_SECS"))
                .filter(|&secs| secs > 0)
                .unwrap_or(5),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            store_backend,
            database,
            expose_store_errors: parse_bool("EXPOSE_STORE_ERRORS", false),
            listener_queue_capacity: parse_value(lookup("LISTENER_QUEUE_CAPACITY"))
                .filter(|&n| n > 0)
                .unwrap_or(256),
            log_format,
        })
    }
}

/// Parses an optional raw value, returning `None` when absent or invalid.
fn parse_value<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|v| v.trim().parse().ok())
}
