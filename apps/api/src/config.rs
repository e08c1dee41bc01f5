//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use stockroom_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub http_host: IpAddr,

    /// HTTP port (the web client expects 4000)
    pub http_port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Exact origin allowed by CORS; any origin when unset
    pub cors_allowed_origin: Option<String>,

    /// Serve GraphiQL on GET /graphql
    pub graphql_playground: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_host: IpAddr::from([0, 0, 0, 0]),
            http_port: 4000,
            database_path: PathBuf::from("./stockroom.db"),
            db_max_connections: 5,
            cors_allowed_origin: None,
            graphql_playground: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    ///
    /// `load` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            http_host: parse_or(&lookup, "HTTP_HOST", defaults.http_host)?,

            http_port: parse_or(&lookup, "HTTP_PORT", defaults.http_port)?,

            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,

            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|o| !o.trim().is_empty()),

            graphql_playground: parse_or(&lookup, "GRAPHQL_PLAYGROUND", defaults.graphql_playground)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http_host, self.http_port)
    }

    /// Database pool settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:4000");
        assert_eq!(config.database_path, PathBuf::from("./stockroom.db"));
        assert_eq!(config.db_max_connections, 5);
        assert!(config.cors_allowed_origin.is_none());
        assert!(config.graphql_playground);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HTTP_HOST", "127.0.0.1"),
            ("HTTP_PORT", "8080"),
            ("DATABASE_PATH", "/data/items.db"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("CORS_ALLOWED_ORIGIN", "http://localhost:9000"),
            ("GRAPHQL_PLAYGROUND", "false"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_path, PathBuf::from("/data/items.db"));
        assert_eq!(config.db_config().max_connections, 12);
        assert_eq!(
            config.cors_allowed_origin.as_deref(),
            Some("http://localhost:9000")
        );
        assert!(!config.graphql_playground);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "HTTP_PORT"
        ));
        assert!(load(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(load(&[("GRAPHQL_PLAYGROUND", "maybe")]).is_err());
    }

    #[test]
    fn test_blank_origin_means_any() {
        let config = load(&[("CORS_ALLOWED_ORIGIN", "  ")]).unwrap();
        assert!(config.cors_allowed_origin.is_none());
    }
}
