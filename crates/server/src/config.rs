use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub use storage::sqlite::{DEFAULT_DB_URL, sqlite_url_for_path};
use storage::sqlite::database_url_from_lookup;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid PORT value: {raw}")]
    InvalidPort { raw: String },
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    Any,
    AllowList(Vec<String>),
}

impl CorsPolicy {
    /// Parse a comma-separated origin list. Blank input or any `*` entry
    /// allows every origin.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            CorsPolicy::Any
        } else {
            CorsPolicy::AllowList(origins)
        }
    }

    #[must_use]
    pub fn layer(&self) -> CorsLayer {
        match self {
            CorsPolicy::Any => CorsLayer::permissive(),
            CorsPolicy::AllowList(origins) => {
                let values: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|origin| match HeaderValue::from_str(origin) {
                        Ok(value) => Some(value),
                        Err(_) => {
                            tracing::warn!(%origin, "ignoring unusable CORS origin");
                            None
                        }
                    })
                    .collect();
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(values))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
    }
}

impl fmt::Display for CorsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorsPolicy::Any => f.write_str("*"),
            CorsPolicy::AllowList(origins) => f.write_str(&origins.join(",")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub cors: CorsPolicy,
    pub db_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            cors: CorsPolicy::Any,
            db_url: DEFAULT_DB_URL.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Read `PORT`, `CORS_ORIGINS`, `DESK_DB_URL` and `DB_PATH` from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPort` if `PORT` is set but not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPort` if `PORT` is set but not a port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            let port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { raw: raw.clone() })?;
            config.addr.set_port(port);
        }

        if let Some(raw) = lookup("CORS_ORIGINS") {
            config.cors = CorsPolicy::parse(&raw);
        }

        config.db_url = database_url_from_lookup(&lookup);

        Ok(config)
    }
}
