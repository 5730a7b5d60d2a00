use std::str::FromStr;

/// Which store the server talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataBackend {
    /// PostgreSQL reached through `DATABASE_URL`.
    Postgres { database_url: String },
    /// Process-local store, emptied on restart.
    Memory,
}

/// A configuration value could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("DATA_BACKEND must be 'postgres' or 'memory', got '{0}'")]
    UnknownBackend(String),
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long a rendered view's data stays cached (default: `60`, `0` disables).
    pub view_cache_ttl_secs: u64,
    pub backend: DataBackend,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default     |
    /// |------------------------|-------------|
    /// | `HOST`                 | `0.0.0.0`   |
    /// | `PORT`                 | `3000`      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`        |
    /// | `VIEW_CACHE_TTL_SECS`  | `60`        |
    /// | `DATA_BACKEND`         | `postgres`  |
    /// | `DATABASE_URL`         | (required for `postgres`) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&lookup, "PORT", 3000, "u16")?;
        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30, "u64")?;
        let view_cache_ttl_secs = parse_var(&lookup, "VIEW_CACHE_TTL_SECS", 60, "u64")?;

        let backend = match lookup("DATA_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => DataBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            Some("memory") => DataBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self {
            host,
            port,
            request_timeout_secs,
            view_cache_ttl_secs,
            backend,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}
