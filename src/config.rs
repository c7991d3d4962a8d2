//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.
//! Settings are read once at startup and handed to the pool and router
//! builders; handlers never look at the environment themselves.

use percent_encoding::percent_decode_str;
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 for Docker
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub ssl: bool,
    pub max_pool_size: usize,
    /// Upper bound on waiting for a pooled connection
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
            ssl: false,
            max_pool_size: 10,
            acquire_timeout_secs: 5,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: parse_var(&lookup, "HOST")?.unwrap_or(server_defaults.host),
            port: parse_var(&lookup, "PORT")?.unwrap_or(server_defaults.port),
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS")?
                .unwrap_or(server_defaults.request_timeout_secs),
        };

        // Try DATABASE_URL first, fall back to individual vars
        let mut database = match lookup("DATABASE_URL") {
            Some(database_url) => Self::parse_database_url(&database_url)?,
            None => {
                let defaults = DatabaseConfig::default();
                DatabaseConfig {
                    host: lookup("DB_HOST").unwrap_or(defaults.host),
                    port: parse_var(&lookup, "DB_PORT")?.unwrap_or(defaults.port),
                    user: lookup("DB_USER").unwrap_or(defaults.user),
                    password: lookup("DB_PASSWORD").unwrap_or_default(),
                    database: lookup("DB_NAME").unwrap_or(defaults.database),
                    ..defaults
                }
            }
        };

        if let Some(ssl) = parse_var(&lookup, "DB_SSL")? {
            database.ssl = ssl;
        }
        if let Some(max) = parse_var(&lookup, "DB_MAX_CONNECTIONS")? {
            database.max_pool_size = max;
        }
        if let Some(secs) = parse_var(&lookup, "DB_ACQUIRE_TIMEOUT_SECS")? {
            database.acquire_timeout_secs = secs;
        }

        if database.max_pool_size == 0 {
            return Err(ConfigError::InvalidValue(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        if database.acquire_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "DB_ACQUIRE_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }
        if server.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "REQUEST_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }

        let cors = CorsConfig {
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(Self {
            server,
            database,
            cors,
        })
    }

    /// Parse a DATABASE_URL connection string (postgresql://...)
    fn parse_database_url(url: &str) -> Result<DatabaseConfig, ConfigError> {
        let parsed = url::Url::parse(url).map_err(|_| {
            ConfigError::InvalidValue(
                "Invalid DATABASE_URL format (expected postgresql://...)".to_string(),
            )
        })?;

        if !matches!(parsed.scheme(), "postgres" | "postgresql") {
            return Err(ConfigError::InvalidValue(format!(
                "Unsupported DATABASE_URL scheme: {}",
                parsed.scheme()
            )));
        }

        let host = parsed
            .host_str()
            .ok_or_else(|| ConfigError::InvalidValue("Missing host in DATABASE_URL".to_string()))?
            .to_string();

        let database = decode_component(parsed.path().trim_start_matches('/'), "database name")?;
        if database.is_empty() {
            return Err(ConfigError::MissingVar(
                "database name in DATABASE_URL".to_string(),
            ));
        }

        let ssl = parsed
            .query_pairs()
            .any(|(k, v)| k == "sslmode" && (v == "require" || v == "verify-full"));

        Ok(DatabaseConfig {
            host,
            port: parsed.port().unwrap_or(5432),
            user: decode_component(parsed.username(), "user")?,
            password: parsed
                .password()
                .map(|p| decode_component(p, "password"))
                .transpose()?
                .unwrap_or_default(),
            database,
            ssl,
            ..DatabaseConfig::default()
        })
    }
}

/// `url` hands back userinfo and path still percent-encoded
fn decode_component(raw: &str, what: &str) -> Result<String, ConfigError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ConfigError::InvalidValue(format!("DATABASE_URL {what} is not valid UTF-8")))
}

/// Parse an optional variable, rejecting values that are present but malformed
fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(format!("{key}={raw}"))),
        None => Ok(None),
    }
}
