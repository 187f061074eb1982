//! Configuration loading from the environment
//!
//! | Env var            | Default                          |
//! |--------------------|----------------------------------|
//! | `HOST`             | `0.0.0.0`                        |
//! | `PORT`             | `5000`                           |
//! | `MONGO_URI`        | unset (in-memory store)          |
//! | `MONGO_DATABASE`   | database named in the URI        |
//! | `MONGO_COLLECTION` | `invoices`                       |
//!
//! A `.env` file is honoured when the binary calls `dotenvy::dotenv()`
//! before [`ServerConfig::from_env`].

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_COLLECTION: &str = "invoices";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),

    #[error("HOST must be an IP address, got '{0}'")]
    InvalidHost(String),

    #[error("MONGO_URI is set but this build has no MongoDB support (enable the `mongodb_backend` feature)")]
    MongoBackendDisabled,
}

/// Which record store to run against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Mongo {
        uri: String,
        database: Option<String>,
        collection: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the environment in
    /// production, a map in tests). Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = match var("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidHost(raw))?,
            None => DEFAULT_HOST
                .parse()
                .map_err(|_| ConfigError::InvalidHost(DEFAULT_HOST.to_string()))?,
        };

        let port = match var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let store = match var("MONGO_URI") {
            Some(uri) => {
                if !cfg!(feature = "mongodb_backend") {
                    return Err(ConfigError::MongoBackendDisabled);
                }
                StoreConfig::Mongo {
                    uri,
                    database: var("MONGO_DATABASE"),
                    collection: var("MONGO_COLLECTION")
                        .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
                }
            }
            None => StoreConfig::InMemory,
        };

        Ok(Self { host, port, store })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
