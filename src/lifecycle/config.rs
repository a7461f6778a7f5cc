//! Process configuration, read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `PORT` | `5001` | TCP port to listen on |
//! | `DATABASE_URL` | `memory://` | `memory://`, `redis://…` or `rediss://…` |
//! | `FRONTEND_DIR` | unset | Prebuilt frontend to serve with SPA fallback |
//! | `APP_ENV` | unset | `production` serves `frontend/dist` when `FRONTEND_DIR` is unset |
use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::info;

use crate::store::{StoreKind, UnsupportedStoreUrl};

pub const DEFAULT_PORT: &str = "5001";
pub const DEFAULT_DATABASE_URL: &str = "memory://";
pub const DEFAULT_FRONTEND_DIR: &str = "frontend/dist";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value `{value}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Store(#[from] UnsupportedStoreUrl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub store: StoreKind,
    pub frontend_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = try_load(&lookup, "PORT", DEFAULT_PORT)?;
        let store = load_or(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL).parse()?;

        let production = lookup("APP_ENV").is_some_and(|env| env == "production");
        let frontend_dir = match lookup("FRONTEND_DIR") {
            Some(dir) => Some(PathBuf::from(dir)),
            None if production => {
                info!("FRONTEND_DIR not set, using default: {DEFAULT_FRONTEND_DIR}");
                Some(PathBuf::from(DEFAULT_FRONTEND_DIR))
            }
            None => None,
        };

        Ok(Self {
            port,
            store,
            frontend_dir,
        })
    }
}

fn load_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = load_or(lookup, key, default);
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 5001);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.frontend_dir, None);
    }

    #[test]
    fn reads_port_and_database_url() {
        let config = config_from(&[("PORT", "8080"), ("DATABASE_URL", "redis://db:6379")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.store, StoreKind::Redis("redis://db:6379".into()));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
        assert!(config_from(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn unsupported_database_is_an_error() {
        let err = config_from(&[("DATABASE_URL", "mongodb://localhost/shop")]).unwrap_err();
        assert!(matches!(err, ConfigError::Store(_)));
    }

    #[test]
    fn production_serves_default_frontend() {
        let config = config_from(&[("APP_ENV", "production")]).unwrap();
        assert_eq!(config.frontend_dir, Some(PathBuf::from(DEFAULT_FRONTEND_DIR)));

        let config = config_from(&[("APP_ENV", "production"), ("FRONTEND_DIR", "/srv/web")]).unwrap();
        assert_eq!(config.frontend_dir, Some(PathBuf::from("/srv/web")));
    }
}
