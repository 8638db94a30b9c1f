//! Configuration loading and representation.
//!
//! Values come from the process environment; a `.env` file in the working
//! directory is loaded first when present.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_EXTERNAL_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_EXTERNAL_API_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory repository.
    pub database: Option<DatabaseConfig>,
    pub external_api: ExternalApiConfig,
}

impl AppConfig {
    /// Load from `.env` (if any) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse(
            "BIND_ADDR",
            get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let database = match get("DATABASE_URL") {
            Some(url) => {
                let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
                    Some(v) => parse("DATABASE_MAX_CONNECTIONS", v)?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                Some(DatabaseConfig {
                    url,
                    max_connections,
                })
            }
            None => None,
        };

        let timeout_secs: u64 = match get("EXTERNAL_API_TIMEOUT_SECS") {
            Some(v) => parse("EXTERNAL_API_TIMEOUT_SECS", v)?,
            None => DEFAULT_EXTERNAL_API_TIMEOUT_SECS,
        };

        let external_api = ExternalApiConfig {
            base_url: get("EXTERNAL_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_EXTERNAL_API_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            bind_addr,
            database,
            external_api,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.database, None);
        assert_eq!(cfg.external_api.base_url, DEFAULT_EXTERNAL_API_BASE_URL);
        assert_eq!(cfg.external_api.timeout, Duration::from_secs(10));
    }

    #[test]
    fn database_url_enables_postgres() {
        let cfg = load(&[
            ("DATABASE_URL", "postgres://localhost/catalog"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(
            cfg.database,
            Some(DatabaseConfig {
                url: "postgres://localhost/catalog".to_string(),
                max_connections: 12,
            })
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = load(&[("DATABASE_URL", "  "), ("BIND_ADDR", "")]).unwrap();
        assert_eq!(cfg.database, None);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn malformed_values_are_reported_with_their_key() {
        let err = load(&[("BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "BIND_ADDR",
                value: "not-an-addr".to_string(),
            }
        );

        let err = load(&[("EXTERNAL_API_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "EXTERNAL_API_TIMEOUT_SECS",
                ..
            }
        ));
    }
}
