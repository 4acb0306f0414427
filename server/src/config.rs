//! Configuration management for the services.

use ballot_core::RetryPolicy;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// PostgreSQL connection, pool and startup settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// Upper bound on concurrently borrowed connections
    pub max_connections: u32,
    /// How long `acquire` (and each startup connect) may wait
    pub acquire_timeout: Duration,
    /// Startup connect attempts before giving up
    pub connect_retries: u32,
    /// Delay between startup connect attempts
    pub retry_delay: Duration,
    /// Apply the schema migration at startup
    pub init_schema: bool,
}

impl DatabaseConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.connect_retries, self.retry_delay)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "postgres".to_string(),
            port: 5432,
            name: "votes".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            min_connections: 1,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
            connect_retries: 5,
            retry_delay: Duration::from_secs(2),
            init_schema: true,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("min_connections", &self.min_connections)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("connect_retries", &self.connect_retries)
            .field("retry_delay", &self.retry_delay)
            .field("init_schema", &self.init_schema)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(default_port, |key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value for a key.
    pub fn from_lookup<F>(default_port: u16, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            host: text(&lookup, "HOST", "0.0.0.0")?,
            port: number(&lookup, "PORT", default_port)?,
        };

        let defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            host: text(&lookup, "DB_HOST", &defaults.host)?,
            port: number(&lookup, "DB_PORT", defaults.port)?,
            name: text(&lookup, "DB_NAME", &defaults.name)?,
            user: text(&lookup, "DB_USER", &defaults.user)?,
            password: text(&lookup, "DB_PASS", &defaults.password)?,
            min_connections: number(&lookup, "DB_POOL_MIN", defaults.min_connections)?,
            max_connections: number(&lookup, "DB_POOL_MAX", defaults.max_connections)?,
            acquire_timeout: Duration::from_secs(number(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )?),
            connect_retries: number(&lookup, "DB_CONNECT_RETRIES", defaults.connect_retries)?,
            retry_delay: Duration::from_secs(number(
                &lookup,
                "DB_RETRY_DELAY_SECS",
                defaults.retry_delay.as_secs(),
            )?),
            init_schema: flag(&lookup, "DB_INIT_SCHEMA", defaults.init_schema)?,
        };

        if database.port == 0 {
            return Err(ConfigError::InvalidPort("DB_PORT"));
        }
        let bounds_ok = database.max_connections > 0
            && database.min_connections <= database.max_connections;
        if !bounds_ok {
            return Err(ConfigError::InvalidPoolBounds {
                min: database.min_connections,
                max: database.max_connections,
            });
        }
        if database.connect_retries == 0 {
            return Err(ConfigError::ZeroRetries);
        }

        Ok(Self { server, database })
    }
}

fn text<F>(lookup: &F, key: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(key)),
        Some(value) => Ok(value),
        None => Ok(default.to_string()),
    }
}

fn number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| match key {
            "PORT" | "DB_PORT" => ConfigError::InvalidPort(key),
            _ => ConfigError::InvalidNumber { key, value },
        }),
        None => Ok(default),
    }
}

fn flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { key, value }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("Invalid {0} value")]
    InvalidPort(&'static str),

    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be a boolean, got {value:?}")]
    InvalidFlag { key: &'static str, value: String },

    #[error("invalid pool bounds: min {min}, max {max}")]
    InvalidPoolBounds { min: u32, max: u32 },

    #[error("DB_CONNECT_RETRIES must be at least 1")]
    ZeroRetries,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(5000, |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_compose_setup() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server.addr(), "0.0.0.0:5000");
        assert_eq!(config.database.host, "postgres");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.name, "votes");
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.retry_policy().max_attempts(), 5);
        assert_eq!(config.database.retry_policy().delay(), Duration::from_secs(2));
        assert!(config.database.init_schema);
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("PORT", "8080"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_POOL_MAX", "4"),
            ("DB_CONNECT_RETRIES", "3"),
            ("DB_INIT_SCHEMA", "false"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.connect_retries, 3);
        assert!(!config.database.init_schema);
    }

    #[test]
    fn rejects_empty_text() {
        let err = load(&[("DB_NAME", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Empty("DB_NAME")));
    }

    #[test]
    fn rejects_bad_ports() {
        assert!(matches!(
            load(&[("DB_PORT", "0")]).unwrap_err(),
            ConfigError::InvalidPort("DB_PORT")
        ));
        assert!(matches!(
            load(&[("DB_PORT", "70000")]).unwrap_err(),
            ConfigError::InvalidPort("DB_PORT")
        ));
        assert!(matches!(
            load(&[("PORT", "http")]).unwrap_err(),
            ConfigError::InvalidPort("PORT")
        ));
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let err = load(&[("DB_POOL_MIN", "5"), ("DB_POOL_MAX", "2")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPoolBounds { min: 5, max: 2 }
        ));
    }

    #[test]
    fn rejects_zero_retries_and_bad_flags() {
        assert!(matches!(
            load(&[("DB_CONNECT_RETRIES", "0")]).unwrap_err(),
            ConfigError::ZeroRetries
        ));
        assert!(matches!(
            load(&[("DB_INIT_SCHEMA", "maybe")]).unwrap_err(),
            ConfigError::InvalidFlag { .. }
        ));
    }

    #[test]
    fn debug_redacts_password() {
        let config = load(&[("DB_PASS", "hunter2")]).unwrap();
        let debug = format!("{:?}", config.database);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
