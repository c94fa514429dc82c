/**
 * Server Configuration
 *
 * Configuration is loaded from environment variables (after `.env`, if
 * present), with defaults suited to local development.
 *
 * # Variables
 *
 * | Variable               | Default                     |
 * |------------------------|-----------------------------|
 * | `DATABASE_URL`         | `sqlite://data/main.sqlite` |
 * | `SERVER_HOST`          | `0.0.0.0`                   |
 * | `SERVER_PORT`          | `8000`                      |
 * | `CORS_ALLOWED_ORIGINS` | `http://localhost:5173`     |
 * | `COOKIE_SECURE`        | `true`                      |
 * | `COOKIE_SAME_SITE`     | `none`                      |
 * | `BCRYPT_COST`          | `12`                        |
 * | `HASH_WORKERS`         | `4`                         |
 *
 * Unlike optional integrations, a bad value here stops the server from
 * starting.
 */

use crate::backend::cookies::{parse_same_site, CookiePolicy};
use axum_extra::extract::cookie::SameSite;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

/// Lowest work factor bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest work factor bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("{0}")]
    Inconsistent(String),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// sqlx SQLite connection URL
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Maximum number of concurrent hash jobs
    pub hash_workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/main.sqlite".to_string(),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            cookie_secure: true,
            cookie_same_site: SameSite::None,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            hash_workers: 4,
        }
    }
}

impl ServerConfig {
    /// Create a new builder seeded with defaults
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(url) = env_var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(host) = env_parse::<IpAddr>("SERVER_HOST")? {
            builder = builder.host(host);
        }
        if let Some(port) = env_parse::<u16>("SERVER_PORT")? {
            builder = builder.port(port);
        }
        if let Some(origins) = env_var("CORS_ALLOWED_ORIGINS") {
            builder = builder.cors_origins(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        if let Some(value) = env_var("COOKIE_SECURE") {
            let secure = parse_bool(&value).ok_or(ConfigError::InvalidValue {
                key: "COOKIE_SECURE",
                value,
            })?;
            builder = builder.cookie_secure(secure);
        }
        if let Some(value) = env_var("COOKIE_SAME_SITE") {
            let same_site = parse_same_site(&value).ok_or(ConfigError::InvalidValue {
                key: "COOKIE_SAME_SITE",
                value,
            })?;
            builder = builder.cookie_same_site(same_site);
        }
        if let Some(cost) = env_parse::<u32>("BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(workers) = env_parse::<usize>("HASH_WORKERS")? {
            builder = builder.hash_workers(workers);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.hash_workers == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HASH_WORKERS",
                value: "0".to_string(),
            });
        }
        // Browsers reject SameSite=None cookies that are not Secure
        if self.cookie_same_site == SameSite::None && !self.cookie_secure {
            return Err(ConfigError::Inconsistent(
                "COOKIE_SAME_SITE=none requires COOKIE_SECURE=true".to_string(),
            ));
        }
        Ok(())
    }

    /// Address to bind the listener to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Cookie attributes derived from this configuration
    pub fn cookie_policy(&self) -> CookiePolicy {
        CookiePolicy::new(self.cookie_secure, self.cookie_same_site)
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    pub fn host(mut self, host: IpAddr) -> Self {
        self.config.host = host;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn cors_origins(mut self, origins: Vec<String>) -> Self {
        self.config.cors_origins = origins;
        self
    }

    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.config.cookie_secure = secure;
        self
    }

    pub fn cookie_same_site(mut self, same_site: SameSite) -> Self {
        self.config.cookie_same_site = same_site;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn hash_workers(mut self, workers: usize) -> Self {
        self.config.hash_workers = workers;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env_var(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(None),
    }
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
